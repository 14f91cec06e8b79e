//! Doctor command - environment checks.

use crate::cli::output;
use crate::cli::resolve::Context;
use crate::core::doctor::{self, Status};
use crate::error::{Error, Result};

/// Run all checks; fails if any check failed.
pub fn execute(json: bool) -> Result<()> {
    let ctx = Context::load()?;
    let checks = doctor::run(&ctx.root, &ctx.settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&checks)?);
    } else {
        for check in &checks {
            let line = format!("{} ({})", check.name, check.detail);
            match check.status {
                Status::Pass => output::success(&line),
                Status::Warn => output::warn(&line),
                Status::Fail => output::error(&line),
            }
        }
    }

    match doctor::failures(&checks) {
        0 => {
            if !json {
                output::success("environment looks healthy");
            }
            Ok(())
        }
        n => Err(Error::Unhealthy(n)),
    }
}
