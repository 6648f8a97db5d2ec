//! Keyword classification.
//!
//! Most summary keywords do not name a column on their own. Well keywords
//! (WOPR, WWCT) mean nothing without the well they belong to, completions
//! need a well and a cell number, local-grid keywords need up to four
//! extra identifiers. The identifiers live in parallel arrays of the
//! specification file: WGNAMES, NUMS, LGRS, NUMLX, NUMLY, NUMLZ.
//!
//! [`identifies`] implements the ruleset: given an identifier array tag
//! and a keyword, it reports whether that array contributes to the
//! keyword's qualified name, and if so, how many identifier arrays are
//! needed in total. The rules key off the keyword's first character, with
//! a fixed list of exception keywords (WNEWTON, STEPTYPE, the `{G,W}M`
//! mnemonic families, saturation prefixes) that look like parametrised
//! classes but are not.
//!
//! Both arguments are 8-byte space-padded ASCII, exactly as found on
//! disk; the exceptions match the full padded keyword, never a prefix.

/// Well/group name identifier tag
pub const WGNAMES: &[u8; 8] = b"WGNAMES ";
/// Cell/region number identifier tag
pub const NUMS: &[u8; 8] = b"NUMS    ";
/// Local grid name identifier tag
pub const LGRS: &[u8; 8] = b"LGRS    ";
/// Local grid X coordinate identifier tag
pub const NUMLX: &[u8; 8] = b"NUMLX   ";
/// Local grid Y coordinate identifier tag
pub const NUMLY: &[u8; 8] = b"NUMLY   ";
/// Local grid Z coordinate identifier tag
pub const NUMLZ: &[u8; 8] = b"NUMLZ   ";

/// The closed universe of identifier tags that can make [`identifies`]
/// return nonzero, in resolution order.
pub fn partial_identifiers() -> [&'static [u8; 8]; 6] {
    [WGNAMES, NUMS, LGRS, NUMLX, NUMLY, NUMLZ]
}

/// Does the identifier array `id` qualify `keyword`, and how many
/// identifiers does the keyword need in total?
///
/// Returns 0 when `id` does not contribute to the keyword's qualified
/// name. A positive return N means the keyword is qualified by N
/// identifier arrays in total, of which `id` is one; callers iterate
/// [`partial_identifiers`] and stop once N positive hits are collected.
///
/// # Examples
///
/// ```
/// use smry::summary::classify::{identifies, NUMS, WGNAMES, LGRS};
///
/// // well keywords need the well name and nothing else
/// assert_eq!(identifies(WGNAMES, b"WOPR    "), 1);
/// assert_eq!(identifies(NUMS, b"WOPR    "), 0);
///
/// // completions need both a well and a cell
/// assert_eq!(identifies(WGNAMES, b"COFR    "), 2);
/// assert_eq!(identifies(NUMS, b"COFR    "), 2);
/// assert_eq!(identifies(LGRS, b"COFR    "), 0);
///
/// // field keywords are complete on their own
/// assert_eq!(identifies(WGNAMES, b"FOPR    "), 0);
/// ```
pub fn identifies(id: &[u8; 8], keyword: &[u8; 8]) -> u32 {
    match keyword[0] {
        // aquifer and block data
        b'A' | b'B' => {
            if id == NUMS {
                1
            } else {
                0
            }
        }

        // completion/connection data
        b'C' => {
            if id == WGNAMES || id == NUMS {
                2
            } else {
                0
            }
        }

        // group data, except the GM mnemonic family
        b'G' => {
            if keyword[1] == b'M' {
                return 0;
            }
            if id == WGNAMES {
                1
            } else {
                0
            }
        }

        b'W' => {
            // the {F,G,W}M mnemonics are reserved for other uses than
            // well/group, and are not parametrised
            if keyword[1] == b'M' {
                return 0;
            }
            // of course, WNEWTON is also a thing
            if keyword == b"WNEWTON " {
                return 0;
            }
            if id == WGNAMES {
                1
            } else {
                0
            }
        }

        b'P' => {
            if id == WGNAMES {
                1
            } else {
                0
            }
        }

        b'R' => {
            if id == NUMS {
                1
            } else {
                0
            }
        }

        // local grid data: second character picks block/completion/well
        b'L' => match keyword[1] {
            b'B' => {
                if id == LGRS || id == NUMLX || id == NUMLY || id == NUMLZ {
                    4
                } else {
                    0
                }
            }
            b'C' => {
                if id == LGRS || id == WGNAMES || id == NUMLX || id == NUMLY || id == NUMLZ {
                    4
                } else {
                    0
                }
            }
            b'W' => {
                if id == LGRS || id == WGNAMES {
                    2
                } else {
                    0
                }
            }
            _ => 0,
        },

        // network data, minus the solver report keywords
        b'N' => {
            match keyword {
                b"NEWTON  " | b"NAIMFRAC" | b"NLINEARS" | b"NLINSMIN" | b"NLINSMAX" => {
                    return 0
                }
                _ => {}
            }
            if id == WGNAMES {
                1
            } else {
                0
            }
        }

        // segment data, minus STEPTYPE and the saturation prefixes
        b'S' => {
            if keyword == b"STEPTYPE" {
                return 0;
            }
            match &keyword[0..4] {
                b"SGAS" | b"SOIL" | b"SWAT" => return 0,
                _ => {}
            }
            if id == WGNAMES || id == NUMS {
                2
            } else {
                0
            }
        }

        _ => 0,
    }
}
