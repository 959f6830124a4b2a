//! Canonical form of clause token streams
//!
//! Both directions of the expression constructor pass their tokens through
//! here, so a clause always prints the same way no matter how it was entered.

use trigex_parser::ClauseToken;

/// Drop parentheses that group a single operand.
///
/// A pair is kept only when an `and`/`or` sits directly inside it:
/// `not (regexp(a))` becomes `not regexp(a)`, `((a or b))` becomes `(a or b)`.
pub(crate) fn simplify(tokens: Vec<ClauseToken>) -> Vec<ClauseToken> {
    let mut keep = vec![true; tokens.len()];
    // (index of the open token, binary operator seen at this depth)
    let mut open: Vec<(usize, bool)> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        match token {
            ClauseToken::Open => open.push((i, false)),
            ClauseToken::And | ClauseToken::Or => {
                if let Some(top) = open.last_mut() {
                    top.1 = true;
                }
            }
            ClauseToken::Close => {
                if let Some((start, has_binary)) = open.pop() {
                    if !has_binary {
                        keep[start] = false;
                        keep[i] = false;
                    }
                }
            }
            _ => {}
        }
    }

    tokens
        .into_iter()
        .zip(keep)
        .filter_map(|(token, keep)| keep.then_some(token))
        .collect()
}

/// Print tokens with canonical spacing, rendering each call through `render`.
pub(crate) fn emit<F>(tokens: &[ClauseToken], render: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut out = String::new();

    for token in tokens {
        match token {
            ClauseToken::Function(call) => out.push_str(&render(call)),
            ClauseToken::And => out.push_str(" and "),
            ClauseToken::Or => out.push_str(" or "),
            ClauseToken::Not => out.push_str("not "),
            ClauseToken::Minus => out.push_str("- "),
            ClauseToken::Open => out.push('('),
            ClauseToken::Close => out.push(')'),
        }
    }

    out
}

/// Index of the `Close` matching the `Open` at `open`
pub(crate) fn matching_close(tokens: &[ClauseToken], open: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token {
            ClauseToken::Open => depth += 1,
            ClauseToken::Close => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}
