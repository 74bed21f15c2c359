//! The `adaptquiz play` command.

use anyhow::Result;

use crate::console::LineAnswers;

use super::{run_rounds, RoundOptions};

pub fn execute(options: RoundOptions) -> Result<()> {
    let stdin = std::io::stdin();
    let mut source = LineAnswers::new(stdin.lock());
    run_rounds(options, &mut source, true)
}
