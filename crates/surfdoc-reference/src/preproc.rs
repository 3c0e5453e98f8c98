//! Evaluation of `#if` / `#elif` conditions.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    Not,
    And,
    Or,
    Eq,
    Ne,
    Open,
    Close,
}

fn tokenize(input: &str) -> Option<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b'(' => {
                tokens.push(Token::Open);
                i += 1;
            }
            b')' => {
                tokens.push(Token::Close);
                i += 1;
            }
            b'!' if bytes.get(i + 1) == Some(&b'=') => {
                tokens.push(Token::Ne);
                i += 2;
            }
            b'!' => {
                tokens.push(Token::Not);
                i += 1;
            }
            b'&' if bytes.get(i + 1) == Some(&b'&') => {
                tokens.push(Token::And);
                i += 2;
            }
            b'|' if bytes.get(i + 1) == Some(&b'|') => {
                tokens.push(Token::Or);
                i += 2;
            }
            b'=' if bytes.get(i + 1) == Some(&b'=') => {
                tokens.push(Token::Eq);
                i += 2;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => break,
            c if c == b'_' || c.is_ascii_alphanumeric() => {
                let start = i;
                while i < bytes.len() && (bytes[i] == b'_' || bytes[i].is_ascii_alphanumeric()) {
                    i += 1;
                }
                tokens.push(Token::Ident(&input[start..i]));
            }
            _ => return None,
        }
    }
    Some(tokens)
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    defined: &'t [String],
}

impl Parser<'_, '_> {
    fn peek(&self) -> Option<&Token<'_>> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, token: &Token<'_>) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or(&mut self) -> Option<bool> {
        let mut value = self.and()?;
        while self.eat(&Token::Or) {
            let rhs = self.and()?;
            value = value || rhs;
        }
        Some(value)
    }

    fn and(&mut self) -> Option<bool> {
        let mut value = self.equality()?;
        while self.eat(&Token::And) {
            let rhs = self.equality()?;
            value = value && rhs;
        }
        Some(value)
    }

    fn equality(&mut self) -> Option<bool> {
        let mut value = self.unary()?;
        loop {
            if self.eat(&Token::Eq) {
                value = value == self.unary()?;
            } else if self.eat(&Token::Ne) {
                value = value != self.unary()?;
            } else {
                return Some(value);
            }
        }
    }

    fn unary(&mut self) -> Option<bool> {
        if self.eat(&Token::Not) {
            return self.unary().map(|v| !v);
        }
        if self.eat(&Token::Open) {
            let value = self.or()?;
            return self.eat(&Token::Close).then_some(value);
        }
        match self.peek()? {
            Token::Ident(name) => {
                let value = match *name {
                    "true" => true,
                    "false" => false,
                    symbol => self.defined.iter().any(|d| d == symbol),
                };
                self.pos += 1;
                Some(value)
            }
            _ => None,
        }
    }
}

/// Evaluate a preprocessor condition against the defined symbols.
///
/// Returns `None` when the condition can't be understood.
pub(crate) fn evaluate(condition: &str, defined: &[String]) -> Option<bool> {
    let tokens = tokenize(condition)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        defined,
    };
    let value = parser.or()?;
    (parser.pos == tokens.len()).then_some(value)
}
