use crate::token::{is_logical_operator, is_reserved_word, Token, TokenKind};
use crate::LexicalError;

/// MiniC source scanner.
///
/// Walks the source line by line, character by character, with one character
/// of lookahead for the two-character operators and comment delimiters.
/// State carried across lines: the open-block-comment flag (with the opening
/// position for the unterminated-comment report). Within a line, a skip
/// counter steps over characters already folded into a multi-character token.
pub struct Scanner {
    tokens: Vec<Token>,
    errors: Vec<LexicalError>,
    /// Opening `(line, column)` while a `/*` comment is unclosed.
    block_comment: Option<(usize, usize)>,
}

impl Scanner {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            errors: Vec::new(),
            block_comment: None,
        }
    }

    /// Tokenize the entire source.
    ///
    /// Never fails: unclassifiable input becomes [`LexicalError`] entries and
    /// scanning continues with the next character.
    pub fn analyze(source: &str) -> (Vec<Token>, Vec<LexicalError>) {
        let mut scanner = Scanner::new();
        for (index, line) in source.lines().enumerate() {
            scanner.scan_line(index + 1, line);
        }
        scanner.finish()
    }

    fn finish(mut self) -> (Vec<Token>, Vec<LexicalError>) {
        if let Some((line, column)) = self.block_comment {
            self.errors
                .push(LexicalError::UnterminatedBlockComment { line, column });
        }
        (self.tokens, self.errors)
    }

    fn scan_line(&mut self, lineno: usize, line: &str) {
        let chars: Vec<char> = line.chars().collect();
        let mut skip = 0usize;

        for index in 0..chars.len() {
            if skip > 0 {
                skip -= 1;
                continue;
            }

            let ch = chars[index];
            let column = index + 1;
            let next = chars.get(index + 1).copied();

            if ch == ' ' || ch == '\t' {
                continue;
            }

            // Inside an open block comment only the closing delimiter matters.
            if self.block_comment.is_some() {
                if ch == '*' && next == Some('/') {
                    self.block_comment = None;
                    skip = 1;
                }
                continue;
            }

            match ch {
                '(' | ')' | ',' | '{' | '}' | ';' => {
                    self.emit(TokenKind::Symbol, ch.to_string(), lineno, column);
                }

                '=' => {
                    if next == Some('=') {
                        self.emit(TokenKind::Equality, "==", lineno, column);
                        skip = 1;
                    } else {
                        self.emit(TokenKind::Assign, "=", lineno, column);
                    }
                }

                '+' | '-' | '*' | '/' | '%' | '^' => {
                    if ch == '+' && next == Some('+') {
                        self.emit(TokenKind::Increment, "++", lineno, column);
                        skip = 1;
                    } else if ch == '-' && next == Some('-') {
                        self.emit(TokenKind::Decrement, "--", lineno, column);
                        skip = 1;
                    } else if ch == '/' && next == Some('*') {
                        // The remainder of the opening line is discarded;
                        // close detection starts on the next line.
                        self.block_comment = Some((lineno, column));
                        return;
                    } else if ch == '/' && next == Some('/') {
                        return;
                    } else {
                        self.emit(TokenKind::ArithmeticOperator, ch.to_string(), lineno, column);
                    }
                }

                '<' | '>' | '!' => {
                    if next == Some('=') {
                        let mut lexeme = ch.to_string();
                        lexeme.push('=');
                        self.emit(TokenKind::RelationalOperator, lexeme, lineno, column);
                        skip = 1;
                    } else {
                        self.emit(TokenKind::RelationalOperator, ch.to_string(), lineno, column);
                    }
                }

                c if c.is_ascii_alphabetic() || c == '_' => {
                    skip = self.scan_word(&chars, index, lineno, column);
                }

                c if c.is_ascii_digit() => {
                    skip = self.scan_number(&chars, index, lineno, column);
                }

                other => {
                    self.errors.push(LexicalError::UnrecognizedCharacter {
                        character: other,
                        line: lineno,
                        column,
                    });
                }
            }
        }
    }

    /// Scan an identifier-shaped run and classify it. Returns how many extra
    /// characters were consumed.
    fn scan_word(&mut self, chars: &[char], start: usize, lineno: usize, column: usize) -> usize {
        let mut end = start + 1;
        while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_') {
            end += 1;
        }
        let word: String = chars[start..end].iter().collect();

        let kind = if is_logical_operator(&word) {
            TokenKind::LogicalOperator
        } else if is_reserved_word(&word) {
            TokenKind::ReservedWord
        } else {
            TokenKind::Identifier
        };
        self.emit(kind, word, lineno, column);
        end - start - 1
    }

    /// Scan a numeric literal: a maximal digit run, optionally extended once
    /// by a `.` that is immediately followed by a digit. Returns how many
    /// extra characters were consumed.
    fn scan_number(&mut self, chars: &[char], start: usize, lineno: usize, column: usize) -> usize {
        let mut end = start + 1;
        let mut is_real = false;
        while end < chars.len() {
            let c = chars[end];
            if c.is_ascii_digit() {
                end += 1;
            } else if c == '.'
                && !is_real
                && chars.get(end + 1).is_some_and(|d| d.is_ascii_digit())
            {
                is_real = true;
                end += 1;
            } else {
                break;
            }
        }
        let mut number: String = chars[start..end].iter().collect();

        // One-token-lookback sign folding: a preceding `-` arithmetic token
        // is removed and its sign absorbed into the literal. This is not a
        // unary-operator analysis; `3-2` folds too.
        let folds_sign = self
            .tokens
            .last()
            .is_some_and(|t| t.kind == TokenKind::ArithmeticOperator && t.lexeme == "-");
        if folds_sign {
            self.tokens.pop();
            number.insert(0, '-');
        }

        let kind = if is_real {
            TokenKind::RealNumber
        } else {
            TokenKind::IntegerNumber
        };
        self.emit(kind, number, lineno, column);
        end - start - 1
    }

    fn emit(&mut self, kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) {
        self.tokens.push(Token::new(kind, lexeme, line, column));
    }
}
