//! Shopper interaction scripts for `varsel simulate`.
//!
//! One step per line or per `;`-separated segment:
//!
//! ```text
//! select 1 M
//! hover 0 Dark Blue
//! unhover 0
//! variant 40123456789
//! reset
//! ```
//!
//! Everything after the group index is the value, so values may contain
//! spaces. Blank segments and lines starting with `#` are ignored.

use anyhow::{bail, Context};
use varsel_engine::{EngineError, VariantChange, VariantSelector};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Select { group: usize, value: String },
    Hover { group: usize, value: String },
    Unhover { group: usize },
    SelectVariant { id: String },
    Reset,
}

impl Step {
    /// Runs this step against `selector`. `Reset` on an empty catalog yields
    /// no change.
    pub(crate) fn apply(
        &self,
        selector: &mut VariantSelector,
    ) -> Result<Option<VariantChange>, EngineError> {
        match self {
            Step::Select { group, value } => selector.select(*group, value).map(Some),
            Step::Hover { group, value } => selector.hover(*group, value).map(Some),
            Step::Unhover { group } => selector.unhover(*group).map(Some),
            Step::SelectVariant { id } => selector.select_variant(id).map(Some),
            Step::Reset => selector.reset_to_default(),
        }
    }
}

/// Parses a whole script.
pub(crate) fn parse_script(source: &str) -> anyhow::Result<Vec<Step>> {
    source
        .lines()
        .flat_map(|line| line.split(';'))
        .map(str::trim)
        .filter(|segment| !segment.is_empty() && !segment.starts_with('#'))
        .map(|segment| parse_step(segment).with_context(|| format!("invalid step '{segment}'")))
        .collect()
}

fn parse_step(segment: &str) -> anyhow::Result<Step> {
    let (verb, rest) = segment
        .split_once(char::is_whitespace)
        .map_or((segment, ""), |(verb, rest)| (verb, rest.trim()));

    match verb {
        "select" => {
            let (group, value) = group_and_value(rest)?;
            Ok(Step::Select { group, value })
        }
        "hover" => {
            let (group, value) = group_and_value(rest)?;
            Ok(Step::Hover { group, value })
        }
        "unhover" => Ok(Step::Unhover {
            group: parse_group(rest)?,
        }),
        "variant" => {
            if rest.is_empty() {
                bail!("missing variant id");
            }
            Ok(Step::SelectVariant {
                id: rest.to_string(),
            })
        }
        "reset" if rest.is_empty() => Ok(Step::Reset),
        "reset" => bail!("reset takes no arguments"),
        other => bail!("unknown command '{other}'"),
    }
}

fn group_and_value(rest: &str) -> anyhow::Result<(usize, String)> {
    let Some((group, value)) = rest.split_once(char::is_whitespace) else {
        bail!("expected '<group> <value>'");
    };
    let value = value.trim();
    if value.is_empty() {
        bail!("missing option value");
    }
    Ok((parse_group(group)?, value.to_string()))
}

fn parse_group(raw: &str) -> anyhow::Result<usize> {
    raw.parse::<usize>()
        .with_context(|| format!("group index '{raw}' is not a number"))
}
