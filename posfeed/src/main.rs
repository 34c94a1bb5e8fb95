use clap::Parser as _;
use posfeed::BaseArgs;

pub fn main() -> anyhow::Result<()> {
    let args = BaseArgs::parse();
    args.evaluate()
}
