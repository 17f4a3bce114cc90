use xshell::{Cmd, Shell};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sh = &Shell::new()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(|s| &**s).collect();
    match *args {
        ["test"] => {
            cargo(sh).args(["test"]).run()?;
            cargo(sh).args(["test", "--features=parking_lot"]).run()?;
            cargo(sh).args(["clippy", "--all-features", "--all-targets"]).run()?;
            cargo(sh).args(["doc", "--all-features"]).run()?;
        }
        _ => {
            return Err(format!("invalid arguments: {args:?}").into());
        }
    }

    Ok(())
}

fn cargo(sh: &Shell) -> Cmd {
    sh.cmd(std::env::var("CARGO").expect("CARGO environment variable not set"))
}
