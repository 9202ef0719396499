use std::panic;
use std::process;

use vd2cpf_cli::run;

fn main() -> anyhow::Result<()> {
  let orig_hook = panic::take_hook();
  panic::set_hook(Box::new(move |panic_info| {
    orig_hook(panic_info);
    process::exit(1);
  }));
  run()
}
