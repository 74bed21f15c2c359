//! The `adaptquiz simulate` command.

use anyhow::Result;

use adaptquiz_core::engine::{Oracle, Strategy};

use super::{run_rounds, RoundOptions};

pub fn execute(strategy: String, options: RoundOptions) -> Result<()> {
    let strategy: Strategy = strategy.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
    let mut source = Oracle::new(strategy);
    run_rounds(options, &mut source, true)
}
