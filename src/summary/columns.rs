//! Qualified column names.
//!
//! The specification file describes the summary matrix through parallel
//! arrays: `KEYWORDS[i]`, `WGNAMES[i]`, `NUMS[i]` (and for local grids
//! `LGRS[i]`, `NUMLX[i]`, `NUMLY[i]`, `NUMLZ[i]`) together describe column
//! `i` of every PARAMS vector. The resolver walks these arrays and emits a
//! fully qualified name per column, e.g. `WOPR:W1` or `COFR:W2:1042`.
//!
//! Specifications routinely contain columns whose identifiers are filled
//! with garbage markers, most commonly `:+:+:+:+`, a blank name, or a
//! negative number. Those columns carry no data and are dropped, which is
//! why the resolver also reports the source position of every emitted
//! column: position `k` of the plan maps back to index `positions[k]` of
//! the input arrays, and hence of each PARAMS vector.

use crate::error::{Result, SmryError};
use crate::summary::classify::{identifies, LGRS, NUMLX, NUMLY, NUMLZ, NUMS, WGNAMES};
use crate::summary::pad8;
use std::collections::HashSet;

/// The parallel identifier arrays of one specification file.
///
/// `keywords`, `wgnames`, and `nums` are required and must be the same
/// length; the local-grid arrays are optional but must match that length
/// when present. Strings may be passed padded or trimmed.
#[derive(Debug, Clone, Default)]
pub struct ColumnInput<'a> {
    /// KEYWORDS array (required)
    pub keywords: &'a [String],
    /// WGNAMES array (required)
    pub wgnames: &'a [String],
    /// NUMS array (required)
    pub nums: &'a [i32],
    /// LGRS array, for local-grid keywords
    pub lgrs: Option<&'a [String]>,
    /// NUMLX array, for local-grid keywords
    pub numlx: Option<&'a [i32]>,
    /// NUMLY array, for local-grid keywords
    pub numly: Option<&'a [i32]>,
    /// NUMLZ array, for local-grid keywords
    pub numlz: Option<&'a [i32]>,
}

/// Resolved column layout: qualified names and their source positions.
///
/// Immutable once built. `positions[k]` is the index into the input
/// arrays (and into every PARAMS vector) that column `k` was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    names: Vec<String>,
    positions: Vec<usize>,
}

impl ColumnPlan {
    /// Qualified column names, in emission order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Source index of every emitted column.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of live columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no column survived resolution.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn void_str(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == ":+:+:+:+"
}

fn void_num(value: i32) -> bool {
    value < 0
}

/// Resolve the qualified column names of a summary matrix.
///
/// For every input row the keyword is qualified, in fixed order, by each
/// identifier array that [`identifies`] says contributes to it: WGNAMES,
/// NUMS, LGRS, NUMLX, NUMLY, NUMLZ. A void identifier (`:+:+:+:+`,
/// all-blank, or a negative number) drops the row; so does a name already
/// emitted. Local-grid names are appended as strings, the NUM-series as
/// plain signed decimals.
///
/// # Errors
///
/// [`SmryError::InvalidArgs`] when the arrays are not all the same
/// length.
///
/// # Examples
///
/// ```
/// use smry::summary::{resolve_columns, ColumnInput};
///
/// let keywords: Vec<String> = ["WWCT", "WWCT", "WOPR"]
///     .map(String::from).to_vec();
/// let wgnames: Vec<String> = ["W1", ":+:+:+:+", "W2"]
///     .map(String::from).to_vec();
/// let nums = vec![-1, -1, -1];
///
/// let plan = resolve_columns(
///     &ColumnInput {
///         keywords: &keywords,
///         wgnames: &wgnames,
///         nums: &nums,
///         ..Default::default()
///     },
///     ":",
/// ).unwrap();
///
/// assert_eq!(plan.names(), ["WWCT:W1", "WOPR:W2"]);
/// assert_eq!(plan.positions(), [0, 2]);
/// ```
pub fn resolve_columns(input: &ColumnInput<'_>, separator: &str) -> Result<ColumnPlan> {
    let nlist = input.keywords.len();
    check_length("WGNAMES", input.wgnames.len(), nlist)?;
    check_length("NUMS", input.nums.len(), nlist)?;
    if let Some(lgrs) = input.lgrs {
        check_length("LGRS", lgrs.len(), nlist)?;
    }
    if let Some(numlx) = input.numlx {
        check_length("NUMLX", numlx.len(), nlist)?;
    }
    if let Some(numly) = input.numly {
        check_length("NUMLY", numly.len(), nlist)?;
    }
    if let Some(numlz) = input.numlz {
        check_length("NUMLZ", numlz.len(), nlist)?;
    }

    let mut names = Vec::new();
    let mut positions = Vec::new();
    let mut seen = HashSet::new();

    'rows: for i in 0..nlist {
        let keyword = pad8(&input.keywords[i]);
        let mut name = input.keywords[i].trim().to_string();

        if identifies(WGNAMES, &keyword) > 0 {
            let wgname = &input.wgnames[i];
            if void_str(wgname) {
                continue 'rows;
            }
            name.push_str(separator);
            name.push_str(wgname.trim());
        }

        if identifies(NUMS, &keyword) > 0 {
            let num = input.nums[i];
            if void_num(num) {
                continue 'rows;
            }
            name.push_str(separator);
            name.push_str(&num.to_string());
        }

        if let Some(lgrs) = input.lgrs {
            if identifies(LGRS, &keyword) > 0 {
                let lgr = &lgrs[i];
                if void_str(lgr) {
                    continue 'rows;
                }
                name.push_str(separator);
                name.push_str(lgr.trim());
            }
        }

        for (tag, array) in [
            (NUMLX, input.numlx),
            (NUMLY, input.numly),
            (NUMLZ, input.numlz),
        ] {
            if let Some(array) = array {
                if identifies(tag, &keyword) > 0 {
                    let value = array[i];
                    if void_num(value) {
                        continue 'rows;
                    }
                    name.push_str(separator);
                    name.push_str(&value.to_string());
                }
            }
        }

        if !seen.insert(name.clone()) {
            continue 'rows;
        }
        names.push(name);
        positions.push(i);
    }

    Ok(ColumnPlan { names, positions })
}

fn check_length(what: &str, len: usize, nlist: usize) -> Result<()> {
    if len != nlist {
        return Err(SmryError::InvalidArgs {
            msg: format!(
                "{} holds {} entries, KEYWORDS holds {}",
                what, len, nlist
            ),
        });
    }
    Ok(())
}
