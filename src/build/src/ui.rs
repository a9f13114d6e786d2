/* src/build/src/ui.rs */

pub const RESET: &str = "\x1b[0m";
pub const YELLOW: &str = "\x1b[33m";

pub fn detail(msg: &str) {
  println!("        {msg}");
}
