use clap::Parser;
use meshweld_cli::{init_logging, Obj2Stl};

fn main() -> anyhow::Result<()> {
    let args = Obj2Stl::parse();
    init_logging(args.verbosity);

    args.run()
}
