//! Line-by-line placeholder substitution

use tracing::{debug, warn};

use crate::parser::ast::ParameterSet;
use crate::renderer::{emit, EmitError, GenerateConfig, Warning};

use super::placeholder::scan_line;

/// Prepended to every expanded template
pub const BANNER: &str = "
! DO NOT EDIT THIS FILE!!!
!
! This file is automatically generated by probin-gen at
! compile-time.
!
! To add a runtime parameter, do so by editing the appropriate _parameters
! file.

";

/// Result of expanding a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    pub warnings: Vec<Warning>,
}

/// Expand every placeholder in `template` against `params`
///
/// Unknown keywords are dropped without output. Line endings of copied
/// lines are preserved.
pub fn expand_template(
    template: &str,
    params: &ParameterSet,
    config: &GenerateConfig,
) -> Result<Expansion, EmitError> {
    let mut text = String::from(BANNER);
    let mut warnings = Vec::new();

    for line in template.split_inclusive('\n') {
        let Some(placeholder) = scan_line(line) else {
            text.push_str(line);
            continue;
        };
        let Some(keyword) = placeholder.keyword() else {
            debug!("ignoring unknown placeholder '{}'", placeholder.name);
            continue;
        };

        let block = emit(keyword, params, &placeholder.indent(), config)?;
        for warning in &block.warnings {
            warn!("@@{}@@: {}", keyword.name(), warning);
        }
        text.push_str(&block.render());
        warnings.extend(block.warnings);
    }

    Ok(Expansion { text, warnings })
}
