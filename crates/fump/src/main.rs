//! CLI entrypoint for fump.

use fump::Application;

fn main() {
    let exit_code = Application::new().run();
    std::process::exit(exit_code);
}
