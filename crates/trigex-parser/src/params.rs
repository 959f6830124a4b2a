//! Shared parameter list scanner
//!
//! Item keys (`key[a,"b",[c]]`) and function calls (`func(a,"b",[c])`) use the
//! same parameter grammar. The scanner walks the list once, keeping nested
//! arrays on an explicit frame stack so that deeply nested input cannot grow
//! the call stack.

use trigex_core::ParameterNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before a parameter, leading spaces are skipped
    NewParam,
    Unquoted,
    Quoted,
    /// Right after a backslash inside a quoted parameter
    QuotedEscape,
    /// After a quoted parameter or nested array, only spaces, `,` or a closer may follow
    EndParam,
}

/// One open bracket group
struct Frame {
    open: usize,
    parameters: Vec<ParameterNode>,
}

/// Parameters of a closed list and the position right after its closer
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParamList {
    pub parameters: Vec<ParameterNode>,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanErrorKind {
    /// Input ended inside the list or inside a quoted parameter
    UnexpectedEnd,
    /// Character not allowed after a quoted parameter or array
    UnexpectedChar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScanError {
    pub position: usize,
    pub kind: ScanErrorKind,
}

/// Scan the parameter list opened at `open`.
///
/// `closer` ends the outermost list (`]` for keys, `)` for functions); nested
/// arrays always close with `]`. Offsets of the produced nodes are `position - base`.
pub(crate) fn scan_param_list(
    input: &str,
    open: usize,
    closer: u8,
    base: usize,
) -> Result<ParamList, ScanError> {
    let bytes = input.as_bytes();
    let mut stack: Vec<Frame> = Vec::new();
    let mut current = Frame {
        open,
        parameters: Vec::new(),
    };
    let mut state = State::NewParam;
    let mut start = open + 1;
    let mut p = open + 1;

    while p < bytes.len() {
        let c = bytes[p];
        let closing = if stack.is_empty() { closer } else { b']' };
        let mut close_frame = false;

        match state {
            State::NewParam => match c {
                b' ' => {}
                b',' => current
                    .parameters
                    .push(ParameterNode::unquoted_raw("", p - base)),
                b'"' => {
                    start = p;
                    state = State::Quoted;
                }
                b'[' => {
                    let parent = std::mem::replace(
                        &mut current,
                        Frame {
                            open: p,
                            parameters: Vec::new(),
                        },
                    );
                    stack.push(parent);
                }
                _ if c == closing => {
                    current
                        .parameters
                        .push(ParameterNode::unquoted_raw("", p - base));
                    close_frame = true;
                }
                _ => {
                    start = p;
                    state = State::Unquoted;
                }
            },
            State::Unquoted => {
                if c == b',' || c == closing {
                    current
                        .parameters
                        .push(ParameterNode::unquoted_raw(&input[start..p], start - base));
                    if c == b',' {
                        state = State::NewParam;
                    } else {
                        close_frame = true;
                    }
                }
            }
            State::Quoted => match c {
                b'\\' => state = State::QuotedEscape,
                b'"' => {
                    current
                        .parameters
                        .push(ParameterNode::quoted_raw(&input[start..=p], start - base));
                    state = State::EndParam;
                }
                _ => {}
            },
            State::QuotedEscape => {
                if c != b'\\' {
                    state = State::Quoted;
                }
            }
            State::EndParam => match c {
                b' ' => {}
                b',' => state = State::NewParam,
                _ if c == closing => close_frame = true,
                _ => {
                    return Err(ScanError {
                        position: p,
                        kind: ScanErrorKind::UnexpectedChar,
                    })
                }
            },
        }

        if close_frame {
            match stack.pop() {
                None => {
                    return Ok(ParamList {
                        parameters: current.parameters,
                        end: p + 1,
                    })
                }
                Some(parent) => {
                    let array = std::mem::replace(&mut current, parent);
                    current.parameters.push(ParameterNode::array(
                        &input[array.open..=p],
                        array.open - base,
                        array.parameters,
                    ));
                    state = State::EndParam;
                }
            }
        }

        p += 1;
    }

    Err(ScanError {
        position: bytes.len(),
        kind: ScanErrorKind::UnexpectedEnd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_key(input: &str) -> Result<ParamList, ScanError> {
        let open = input.find('[').unwrap();
        scan_param_list(input, open, b']', 0)
    }

    #[test]
    fn test_simple_list() {
        let list = scan_key("k[a,b]").unwrap();
        assert_eq!(
            list.parameters,
            vec![
                ParameterNode::unquoted_raw("a", 2),
                ParameterNode::unquoted_raw("b", 4),
            ]
        );
        assert_eq!(list.end, 6);
    }

    #[test]
    fn test_empty_parameters() {
        let list = scan_key("k[,]").unwrap();
        assert_eq!(list.parameters.len(), 2);
        assert!(list.parameters.iter().all(|p| p.raw().is_empty()));
    }

    #[test]
    fn test_nested_arrays() {
        let list = scan_key("k[a,[b,[c]],d]").unwrap();
        assert_eq!(list.parameters.len(), 3);

        let outer = &list.parameters[1];
        assert_eq!(outer.raw(), "[b,[c]]");
        assert_eq!(outer.offset(), 4);
        assert_eq!(outer.parameters()[1].raw(), "[c]");
        assert_eq!(outer.parameters()[1].parameters()[0].offset(), 8);
        assert_eq!(list.parameters[2].raw(), "d");
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let depth = 1_000;
        let input = format!("k[{}x{}]", "[".repeat(depth), "]".repeat(depth));
        let list = scan_key(&input).unwrap();
        assert_eq!(list.end, input.len());
    }

    #[test]
    fn test_escape_keeps_string_open() {
        let err = scan_key(r#"k["a\"]"#).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::UnexpectedEnd);

        let err = scan_key(r#"k["a\\"]"#).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::UnexpectedEnd);
    }

    #[test]
    fn test_text_after_quoted_parameter() {
        let err = scan_key(r#"k["a"b]"#).unwrap_err();
        assert_eq!(err, ScanError { position: 5, kind: ScanErrorKind::UnexpectedChar });
    }

    #[test]
    fn test_function_closer_and_base() {
        let input = "f( a,])";
        let list = scan_param_list(input, 1, b')', 2).unwrap();
        assert_eq!(list.parameters[0], ParameterNode::unquoted_raw("a", 1));
        assert_eq!(list.parameters[1], ParameterNode::unquoted_raw("]", 3));
        assert_eq!(list.end, input.len());
    }
}
