use clap::Parser;
use meshweld_cli::{init_logging, Stl2Obj};

fn main() -> anyhow::Result<()> {
    let args = Stl2Obj::parse();
    init_logging(args.verbosity);

    args.run()
}
