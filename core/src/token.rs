//! Command-line tokenization.
//!
//! Classifies raw arguments as long options, short-option clusters,
//! positionals or the `--` terminator. Each argument is classified on its
//! own; whitespace inside an argument is never re-split.

/// One classified argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// `--name` or `--name=value`.
    Long { name: &'a str, value: Option<&'a str> },
    /// `-abc` or `-abc=value`; `cluster` excludes the leading dash.
    Short {
        cluster: &'a str,
        value: Option<&'a str>,
    },
    Positional(&'a str),
    /// The bare `--` separator.
    Terminator,
}

/// Classifies a single argument, ignoring terminator state.
pub(crate) fn classify(arg: &str) -> Token<'_> {
    if arg == "--" {
        return Token::Terminator;
    }
    if let Some(rest) = arg.strip_prefix("--") {
        let (name, value) = split_value(rest);
        return Token::Long { name, value };
    }
    match arg.strip_prefix('-') {
        Some(rest) if !rest.is_empty() => {
            let (cluster, value) = split_value(rest);
            Token::Short { cluster, value }
        }
        _ => Token::Positional(arg),
    }
}

/// Splits on the first `=`; later `=` characters stay in the value.
fn split_value(body: &str) -> (&str, Option<&str>) {
    match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    }
}

/// Walks the arguments after argument 0.
///
/// Yields [`Token`]s; once the terminator has been seen every later argument
/// is a [`Token::Positional`]. [`take_value`](Tokenizer::take_value) consumes
/// the next raw argument verbatim for a flag that needs a separate value.
#[derive(Debug)]
pub(crate) struct Tokenizer<'a> {
    args: &'a [String],
    pos: usize,
    terminated: bool,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(args: &'a [String]) -> Self {
        Self {
            args,
            pos: 0,
            terminated: false,
        }
    }

    /// Consumes the next argument as a flag value, whatever it looks like.
    pub(crate) fn take_value(&mut self) -> Option<&'a str> {
        let value = self.args.get(self.pos)?;
        self.pos += 1;
        Some(value.as_str())
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let arg = self.args.get(self.pos)?.as_str();
        self.pos += 1;

        if self.terminated {
            return Some(Token::Positional(arg));
        }
        let token = classify(arg);
        if token == Token::Terminator {
            self.terminated = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_shapes() {
        assert_eq!(
            classify("--hostname=example.com"),
            Token::Long {
                name: "hostname",
                value: Some("example.com")
            }
        );
        assert_eq!(
            classify("--verbose"),
            Token::Long {
                name: "verbose",
                value: None
            }
        );
        assert_eq!(
            classify("-laHrt"),
            Token::Short {
                cluster: "laHrt",
                value: None
            }
        );
        assert_eq!(
            classify("-t=500"),
            Token::Short {
                cluster: "t",
                value: Some("500")
            }
        );
        assert_eq!(classify("-"), Token::Positional("-"));
        assert_eq!(classify("file.txt"), Token::Positional("file.txt"));
        assert_eq!(classify("--"), Token::Terminator);
    }

    #[test]
    fn test_first_equals_splits() {
        assert_eq!(
            classify("--query=a=b"),
            Token::Long {
                name: "query",
                value: Some("a=b")
            }
        );
        assert_eq!(
            classify("--name="),
            Token::Long {
                name: "name",
                value: Some("")
            }
        );
    }

    #[test]
    fn test_spaces_are_not_resplit() {
        assert_eq!(
            classify("--msg=a value with spaces"),
            Token::Long {
                name: "msg",
                value: Some("a value with spaces")
            }
        );
        assert_eq!(classify("two words"), Token::Positional("two words"));
    }

    #[test]
    fn test_terminator_makes_rest_positional() {
        let raw = args(&["-v", "--", "--hostname=x", "--", "-p"]);
        let tokens: Vec<Token<'_>> = Tokenizer::new(&raw).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Short {
                    cluster: "v",
                    value: None
                },
                Token::Terminator,
                Token::Positional("--hostname=x"),
                Token::Positional("--"),
                Token::Positional("-p"),
            ]
        );
    }

    #[test]
    fn test_take_value_is_verbatim() {
        let raw = args(&["-t", "-5", "--"]);
        let mut tokens = Tokenizer::new(&raw);
        assert!(matches!(tokens.next(), Some(Token::Short { cluster: "t", .. })));
        assert_eq!(tokens.take_value(), Some("-5"));
        assert_eq!(tokens.take_value(), Some("--"));
        assert_eq!(tokens.take_value(), None);
        assert_eq!(tokens.next(), None);
    }
}
