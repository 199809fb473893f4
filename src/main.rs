mod cmd;

use crate::cmd::Cmd;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    cmd.run()
}
