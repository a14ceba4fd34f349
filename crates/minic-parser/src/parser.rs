//! Recursive-descent parser for MiniC.
//!
//! One routine per nonterminal. `eat` consumes an expected token; on a
//! mismatch it records the fault and synchronizes (skips to the next `;`,
//! `{` or `}` and consumes it) instead of aborting. Statement-list parsing
//! additionally catches "no routine can start here" faults per statement, so
//! one bad statement never takes down the rest of the block.
//!
//! Token kinds are coarse, so expectations match on kind plus lexeme where
//! needed. Keyword expectations accept either `RESERVED_WORD` or
//! `IDENTIFIER` with the right lexeme: `float` is absent from the
//! reserved-word set and arrives as an identifier.

use std::fmt;

use minic_lexer::{Token, TokenKind};

use crate::ast::{AstNode, NodeLabel};
use crate::ParseError;

/// What `eat` requires at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expectation {
    Keyword(&'static str),
    Symbol(char),
    Kind(TokenKind),
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Keyword(word) => write!(f, "'{word}'"),
            Expectation::Symbol(symbol) => write!(f, "'{symbol}'"),
            Expectation::Kind(kind) => write!(f, "{kind}"),
        }
    }
}

/// MiniC token-stream parser.
///
/// Owns its cursor and error list, so independent parses are re-entrant.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    /// Create a parser over the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the stream into a `Program` tree.
    ///
    /// Always returns a root. When faults were recorded, an `Errors` node
    /// (one `Error` child per fault) is appended as the root's last child,
    /// and the same list is returned alongside.
    pub fn parse(mut self) -> (AstNode, Vec<ParseError>) {
        let mut root = self.program();
        if !self.errors.is_empty() {
            let mut wrapper = AstNode::new(NodeLabel::Errors);
            for error in &self.errors {
                wrapper.push(AstNode::with_value(NodeLabel::Error, error.to_string()));
            }
            root.push(wrapper);
        }
        (root, self.errors)
    }

    // =========================================================================
    // Program structure
    // =========================================================================

    /// `Program := 'main' '{' Declaration* Statement* '}'`
    fn program(&mut self) -> AstNode {
        let value = self.peek().map(|t| t.lexeme.clone());
        self.eat(Expectation::Keyword("main"));
        self.eat(Expectation::Symbol('{'));
        let mut children = self.declaration_list();
        children.extend(self.sentence_list());
        self.eat(Expectation::Symbol('}'));
        AstNode {
            label: NodeLabel::Program,
            value,
            children,
        }
    }

    fn declaration_list(&mut self) -> Vec<AstNode> {
        let mut declarations = Vec::new();
        while self.at_declaration_keyword() {
            declarations.push(self.variable_declaration());
        }
        declarations
    }

    /// `Declaration := ('int'|'double'|'float') Identifier (',' Identifier)* ';'`
    fn variable_declaration(&mut self) -> AstNode {
        let type_name = self.current_lexeme();
        self.advance(); // type keyword, checked by declaration_list
        let identifiers = self.identifier_list();
        self.eat(Expectation::Symbol(';'));
        AstNode {
            label: NodeLabel::VariableDeclaration,
            value: Some(type_name),
            children: identifiers,
        }
    }

    fn identifier_list(&mut self) -> Vec<AstNode> {
        let mut identifiers = Vec::new();
        // Lexemes are captured before `eat` so recovery still yields a node.
        let name = self.current_lexeme();
        self.eat(Expectation::Kind(TokenKind::Identifier));
        identifiers.push(AstNode::with_value(NodeLabel::Identifier, name));
        while self.at_symbol(",") {
            self.advance();
            let name = self.current_lexeme();
            self.eat(Expectation::Kind(TokenKind::Identifier));
            identifiers.push(AstNode::with_value(NodeLabel::Identifier, name));
        }
        identifiers
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Parse statements until `}` or end of stream, recovering per statement.
    fn sentence_list(&mut self) -> Vec<AstNode> {
        let mut statements = Vec::new();
        while self.peek().is_some() && !self.at_symbol("}") {
            match self.sentence() {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    self.errors.push(error);
                    self.synchronize();
                }
            }
        }
        statements
    }

    fn sentence(&mut self) -> Result<AstNode, ParseError> {
        let (kind, lexeme) = match self.peek() {
            Some(token) => (token.kind, token.lexeme.clone()),
            None => return Err(self.unexpected_token()),
        };
        match (kind, lexeme.as_str()) {
            (TokenKind::ReservedWord, "if") => self.if_statement(),
            (TokenKind::ReservedWord, "while") => self.while_statement(),
            (TokenKind::ReservedWord, "do") => self.do_while_statement(),
            (TokenKind::ReservedWord, "cin") => self.input_statement(),
            (TokenKind::ReservedWord, "cout") => self.output_statement(),
            (TokenKind::Identifier, _) => self.assignment_or_step(),
            _ => Err(self.unexpected_token()),
        }
    }

    /// `If := 'if' '(' Expr ')' '{' Statement* '}' ('else' '{' Statement* '}')?`
    fn if_statement(&mut self) -> Result<AstNode, ParseError> {
        self.advance(); // `if`, checked by sentence
        self.eat(Expectation::Symbol('('));
        let condition = self.expression()?;
        self.eat(Expectation::Symbol(')'));
        self.eat(Expectation::Symbol('{'));
        let true_branch = self.sentence_list();
        self.eat(Expectation::Symbol('}'));

        let mut node = AstNode::with_value(NodeLabel::If, "if");
        node.push(condition);
        node.push(AstNode {
            label: NodeLabel::TrueBranch,
            value: Some("true_branch".into()),
            children: true_branch,
        });

        if self.at_keyword("else") {
            self.advance();
            self.eat(Expectation::Symbol('{'));
            let false_branch = self.sentence_list();
            self.eat(Expectation::Symbol('}'));
            node.push(AstNode {
                label: NodeLabel::FalseBranch,
                value: Some("false_branch".into()),
                children: false_branch,
            });
        }
        Ok(node)
    }

    /// `While := 'while' '(' Expr ')' '{' Statement* '}'`
    fn while_statement(&mut self) -> Result<AstNode, ParseError> {
        self.advance(); // `while`, checked by sentence
        self.eat(Expectation::Symbol('('));
        let condition = self.expression()?;
        self.eat(Expectation::Symbol(')'));
        self.eat(Expectation::Symbol('{'));
        let body = self.sentence_list();
        self.eat(Expectation::Symbol('}'));

        let mut node = AstNode::with_value(NodeLabel::While, "while");
        node.push(condition);
        node.children.extend(body);
        Ok(node)
    }

    /// `DoWhile := 'do' '{' Statement* '}' 'while' '(' Expr ')'`
    ///
    /// No trailing `;` after the closing parenthesis.
    fn do_while_statement(&mut self) -> Result<AstNode, ParseError> {
        self.advance(); // `do`, checked by sentence
        self.eat(Expectation::Symbol('{'));
        let body = self.sentence_list();
        self.eat(Expectation::Symbol('}'));
        self.eat(Expectation::Keyword("while"));
        self.eat(Expectation::Symbol('('));
        let condition = self.expression()?;
        self.eat(Expectation::Symbol(')'));

        let mut node = AstNode::with_value(NodeLabel::DoWhile, "do_while");
        node.children.extend(body);
        node.push(condition);
        Ok(node)
    }

    /// `Input := 'cin' Identifier ';'`
    fn input_statement(&mut self) -> Result<AstNode, ParseError> {
        self.advance(); // `cin`, checked by sentence
        let name = self.current_lexeme();
        self.eat(Expectation::Kind(TokenKind::Identifier));
        self.eat(Expectation::Symbol(';'));

        let mut node = AstNode::with_value(NodeLabel::Input, "cin");
        node.push(AstNode::with_value(NodeLabel::Identifier, name));
        Ok(node)
    }

    /// `Output := 'cout' Expr ';'`
    fn output_statement(&mut self) -> Result<AstNode, ParseError> {
        self.advance(); // `cout`, checked by sentence
        let expression = self.expression()?;
        self.eat(Expectation::Symbol(';'));

        let mut node = AstNode::with_value(NodeLabel::Output, "cout");
        node.push(expression);
        Ok(node)
    }

    /// `AssignOrIncDec := Identifier ('=' Expr | '++' | '--') ';'`
    fn assignment_or_step(&mut self) -> Result<AstNode, ParseError> {
        let name = self.current_lexeme();
        self.advance(); // identifier, checked by sentence

        let Some(kind) = self.peek().map(|t| t.kind) else {
            return Err(self.unexpected_token());
        };
        match kind {
            TokenKind::Assign => {
                let operator = self.current_lexeme();
                self.advance();
                let expression = self.assigned_expression()?;
                self.eat(Expectation::Symbol(';'));
                let mut node = AstNode::with_value(NodeLabel::Assignment, operator);
                node.push(AstNode::with_value(NodeLabel::Identifier, name));
                node.push(expression);
                Ok(node)
            }
            TokenKind::Increment => {
                let operator = self.current_lexeme();
                self.advance();
                self.eat(Expectation::Symbol(';'));
                let mut node = AstNode::with_value(NodeLabel::Increment, operator);
                node.push(AstNode::with_value(NodeLabel::Identifier, name));
                Ok(node)
            }
            TokenKind::Decrement => {
                let operator = self.current_lexeme();
                self.advance();
                self.eat(Expectation::Symbol(';'));
                let mut node = AstNode::with_value(NodeLabel::Decrement, operator);
                node.push(AstNode::with_value(NodeLabel::Identifier, name));
                Ok(node)
            }
            _ => Err(self.unexpected_token()),
        }
    }

    /// Right-hand side of an assignment. An immediate `;` yields an
    /// `EmptyStatement` node; the `;` itself is left for the assignment's
    /// closing `eat`.
    fn assigned_expression(&mut self) -> Result<AstNode, ParseError> {
        if self.at_symbol(";") {
            Ok(AstNode::new(NodeLabel::EmptyStatement))
        } else {
            self.expression()
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// `Expr := LogicalExpr (RelOp LogicalExpr)?` — at most one comparison,
    /// no chaining.
    fn expression(&mut self) -> Result<AstNode, ParseError> {
        let mut node = self.logical_expression()?;
        if self.peek().is_some_and(|t| {
            matches!(t.kind, TokenKind::RelationalOperator | TokenKind::Equality)
        }) {
            let operator = self.current_lexeme();
            self.advance();
            let rhs = self.logical_expression()?;
            let mut comparison = AstNode::with_value(NodeLabel::Comparison, operator);
            comparison.push(node);
            comparison.push(rhs);
            node = comparison;
        }
        Ok(node)
    }

    /// `LogicalExpr := SimpleExpr (('and'|'or') SimpleExpr)*`
    fn logical_expression(&mut self) -> Result<AstNode, ParseError> {
        let mut node = self.simple_expression()?;
        while self
            .peek()
            .is_some_and(|t| t.kind == TokenKind::LogicalOperator)
        {
            let operator = self.current_lexeme();
            self.advance();
            let rhs = self.simple_expression()?;
            let mut op = AstNode::with_value(NodeLabel::LogicalOp, operator);
            op.push(node);
            op.push(rhs);
            node = op;
        }
        Ok(node)
    }

    /// `SimpleExpr := Term (('+'|'-') Term)*`
    fn simple_expression(&mut self) -> Result<AstNode, ParseError> {
        let mut node = self.term()?;
        while self.at_arithmetic(&["+", "-"]) {
            let operator = self.current_lexeme();
            self.advance();
            let rhs = self.term()?;
            let mut op = AstNode::with_value(NodeLabel::ArithmeticOp, operator);
            op.push(node);
            op.push(rhs);
            node = op;
        }
        Ok(node)
    }

    /// `Term := Factor (('*'|'/'|'%') Factor)*`
    fn term(&mut self) -> Result<AstNode, ParseError> {
        let mut node = self.factor()?;
        while self.at_arithmetic(&["*", "/", "%"]) {
            let operator = self.current_lexeme();
            self.advance();
            let rhs = self.factor()?;
            let mut op = AstNode::with_value(NodeLabel::ArithmeticOp, operator);
            op.push(node);
            op.push(rhs);
            node = op;
        }
        Ok(node)
    }

    /// `Factor := Component ('^' Component)*`
    fn factor(&mut self) -> Result<AstNode, ParseError> {
        let mut node = self.component()?;
        while self.at_arithmetic(&["^"]) {
            let operator = self.current_lexeme();
            self.advance();
            let rhs = self.component()?;
            let mut op = AstNode::with_value(NodeLabel::ArithmeticOp, operator);
            op.push(node);
            op.push(rhs);
            node = op;
        }
        Ok(node)
    }

    /// `Component := '(' Expr ')' | Number | Identifier`
    fn component(&mut self) -> Result<AstNode, ParseError> {
        let (kind, lexeme) = match self.peek() {
            Some(token) => (token.kind, token.lexeme.clone()),
            None => return Err(self.unexpected_token()),
        };
        match kind {
            TokenKind::Symbol if lexeme == "(" => {
                self.advance();
                let node = self.expression()?;
                self.eat(Expectation::Symbol(')'));
                Ok(node)
            }
            TokenKind::IntegerNumber | TokenKind::RealNumber => {
                let value = self.current_lexeme();
                self.advance();
                Ok(AstNode::with_value(NodeLabel::Number, value))
            }
            TokenKind::Identifier => {
                let name = self.current_lexeme();
                self.advance();
                Ok(AstNode::with_value(NodeLabel::Identifier, name))
            }
            _ => Err(self.unexpected_token()),
        }
    }

    // =========================================================================
    // Token navigation and recovery
    // =========================================================================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn current_lexeme(&self) -> String {
        self.peek().map(|t| t.lexeme.clone()).unwrap_or_default()
    }

    fn at_symbol(&self, lexeme: &str) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == TokenKind::Symbol && t.lexeme == lexeme)
    }

    fn at_keyword(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| {
            matches!(t.kind, TokenKind::ReservedWord | TokenKind::Identifier) && t.lexeme == word
        })
    }

    fn at_declaration_keyword(&self) -> bool {
        self.at_keyword("int") || self.at_keyword("double") || self.at_keyword("float")
    }

    fn at_arithmetic(&self, operators: &[&str]) -> bool {
        self.peek().is_some_and(|t| {
            t.kind == TokenKind::ArithmeticOperator && operators.contains(&t.lexeme.as_str())
        })
    }

    fn token_matches(token: &Token, expected: Expectation) -> bool {
        match expected {
            Expectation::Keyword(word) => {
                matches!(token.kind, TokenKind::ReservedWord | TokenKind::Identifier)
                    && token.lexeme == word
            }
            Expectation::Symbol(symbol) => {
                token.kind == TokenKind::Symbol && token.lexeme.len() == 1
                    && token.lexeme.starts_with(symbol)
            }
            Expectation::Kind(kind) => token.kind == kind,
        }
    }

    /// Consume the expected token, or record the mismatch and synchronize.
    fn eat(&mut self, expected: Expectation) {
        let matched = self
            .peek()
            .is_some_and(|token| Self::token_matches(token, expected));
        if matched {
            self.advance();
        } else {
            let error = self.mismatch(expected);
            self.errors.push(error);
            self.synchronize();
        }
    }

    /// Skip tokens until a statement boundary (`;`, `{` or `}`), then consume
    /// the boundary token. Every call either advances the cursor or reaches
    /// the end of the stream, so recovery cannot loop.
    fn synchronize(&mut self) {
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::Symbol && matches!(token.lexeme.as_str(), ";" | "{" | "}")
            {
                break;
            }
            self.advance();
        }
        self.advance();
    }

    fn describe_current(&self) -> String {
        match self.peek() {
            Some(token) => format!("{} '{}'", token.kind, token.lexeme),
            None => "end of input".to_string(),
        }
    }

    /// Position for an error report: the current token, or the last token
    /// once the stream is exhausted.
    fn error_position(&self) -> (usize, usize) {
        if let Some(token) = self.peek() {
            (token.line, token.column)
        } else if let Some(token) = self.tokens.last() {
            (token.line, token.column)
        } else {
            (1, 1)
        }
    }

    fn mismatch(&self, expected: Expectation) -> ParseError {
        let (line, column) = self.error_position();
        ParseError {
            message: format!("expected {expected}, found {}", self.describe_current()),
            line,
            column,
        }
    }

    fn unexpected_token(&self) -> ParseError {
        let (line, column) = self.error_position();
        let message = match self.peek() {
            Some(_) => format!("unexpected token {}", self.describe_current()),
            None => "unexpected end of input".to_string(),
        };
        ParseError {
            message,
            line,
            column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minic_lexer::Scanner;
    use pretty_assertions::assert_eq;

    fn parse_source(source: &str) -> (AstNode, Vec<ParseError>) {
        let (tokens, lex_errors) = Scanner::analyze(source);
        assert!(lex_errors.is_empty(), "lexical errors: {lex_errors:?}");
        Parser::new(tokens).parse()
    }

    fn parse_clean(source: &str) -> AstNode {
        let (root, errors) = parse_source(source);
        assert!(errors.is_empty(), "parse errors: {errors:?}");
        root
    }

    fn child_labels(node: &AstNode) -> Vec<NodeLabel> {
        node.children.iter().map(|c| c.label).collect()
    }

    // =========================================================================
    // Program structure
    // =========================================================================

    #[test]
    fn test_program_shape() {
        let root = parse_clean("main{int a; a=1; cout a; }");
        assert_eq!(root.label, NodeLabel::Program);
        assert_eq!(root.value.as_deref(), Some("main"));
        assert_eq!(
            child_labels(&root),
            vec![
                NodeLabel::VariableDeclaration,
                NodeLabel::Assignment,
                NodeLabel::Output,
            ]
        );
    }

    #[test]
    fn test_declaration_with_multiple_identifiers() {
        let root = parse_clean("main{int a, b, c;}");
        let declaration = &root.children[0];
        assert_eq!(declaration.value.as_deref(), Some("int"));
        let names: Vec<_> = declaration.children.iter().map(AstNode::caption).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_all_declaration_types() {
        // `float` lexes as an identifier but still opens a declaration.
        let root = parse_clean("main{int a; double b; float c;}");
        let types: Vec<_> = root
            .children
            .iter()
            .map(|d| d.value.as_deref().unwrap())
            .collect();
        assert_eq!(types, vec!["int", "double", "float"]);
    }

    // =========================================================================
    // Statements
    // =========================================================================

    #[test]
    fn test_assignment() {
        let root = parse_clean("main{x=1;}");
        let assignment = &root.children[0];
        assert_eq!(assignment.label, NodeLabel::Assignment);
        assert_eq!(assignment.value.as_deref(), Some("="));
        assert_eq!(assignment.children[0].caption(), "x");
        assert_eq!(assignment.children[1].label, NodeLabel::Number);
        assert_eq!(assignment.children[1].caption(), "1");
    }

    #[test]
    fn test_empty_assignment_right_hand_side() {
        let root = parse_clean("main{x=;}");
        let assignment = &root.children[0];
        assert_eq!(
            child_labels(assignment),
            vec![NodeLabel::Identifier, NodeLabel::EmptyStatement]
        );
    }

    #[test]
    fn test_increment_and_decrement() {
        let root = parse_clean("main{a++; b--;}");
        assert_eq!(root.children[0].label, NodeLabel::Increment);
        assert_eq!(root.children[0].value.as_deref(), Some("++"));
        assert_eq!(root.children[0].children[0].caption(), "a");
        assert_eq!(root.children[1].label, NodeLabel::Decrement);
        assert_eq!(root.children[1].value.as_deref(), Some("--"));
    }

    #[test]
    fn test_input_statement() {
        let root = parse_clean("main{cin x;}");
        let input = &root.children[0];
        assert_eq!(input.label, NodeLabel::Input);
        assert_eq!(input.value.as_deref(), Some("cin"));
        assert_eq!(input.children[0].caption(), "x");
    }

    #[test]
    fn test_output_statement() {
        let root = parse_clean("main{cout a+1;}");
        let output = &root.children[0];
        assert_eq!(output.label, NodeLabel::Output);
        assert_eq!(output.value.as_deref(), Some("cout"));
        assert_eq!(output.children[0].label, NodeLabel::ArithmeticOp);
    }

    #[test]
    fn test_if_without_else() {
        let root = parse_clean("main{if(a<b){x=1;}}");
        let if_node = &root.children[0];
        assert_eq!(if_node.label, NodeLabel::If);
        assert_eq!(
            child_labels(if_node),
            vec![NodeLabel::Comparison, NodeLabel::TrueBranch]
        );
        assert_eq!(if_node.children[1].children.len(), 1);
    }

    #[test]
    fn test_if_with_else() {
        let root = parse_clean("main{if(a){x=1;}else{x=2;}}");
        let if_node = &root.children[0];
        assert_eq!(
            child_labels(if_node),
            vec![
                NodeLabel::Identifier,
                NodeLabel::TrueBranch,
                NodeLabel::FalseBranch,
            ]
        );
        assert_eq!(if_node.children[2].value.as_deref(), Some("false_branch"));
    }

    #[test]
    fn test_while_statement() {
        let root = parse_clean("main{while(a<10){a++;}}");
        let while_node = &root.children[0];
        assert_eq!(while_node.label, NodeLabel::While);
        assert_eq!(
            child_labels(while_node),
            vec![NodeLabel::Comparison, NodeLabel::Increment]
        );
    }

    #[test]
    fn test_do_while_statement() {
        // Condition comes last; no `;` after the closing parenthesis.
        let root = parse_clean("main{do{a++;}while(a<10)}");
        let do_node = &root.children[0];
        assert_eq!(do_node.label, NodeLabel::DoWhile);
        assert_eq!(do_node.value.as_deref(), Some("do_while"));
        assert_eq!(
            child_labels(do_node),
            vec![NodeLabel::Increment, NodeLabel::Comparison]
        );
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    #[test]
    fn test_precedence_multiplication_binds_tighter() {
        let root = parse_clean("main{x=1+2*3;}");
        let sum = &root.children[0].children[1];
        assert_eq!(sum.value.as_deref(), Some("+"));
        assert_eq!(sum.children[0].caption(), "1");
        let product = &sum.children[1];
        assert_eq!(product.value.as_deref(), Some("*"));
        assert_eq!(product.children[0].caption(), "2");
        assert_eq!(product.children[1].caption(), "3");
    }

    #[test]
    fn test_left_associative_chain() {
        let root = parse_clean("main{x=1-2-3;}");
        let outer = &root.children[0].children[1];
        assert_eq!(outer.value.as_deref(), Some("-"));
        let inner = &outer.children[0];
        assert_eq!(inner.value.as_deref(), Some("-"));
        assert_eq!(inner.children[0].caption(), "1");
        assert_eq!(inner.children[1].caption(), "2");
        assert_eq!(outer.children[1].caption(), "3");
    }

    #[test]
    fn test_power_tier() {
        let root = parse_clean("main{x=2^3*4;}");
        let product = &root.children[0].children[1];
        assert_eq!(product.value.as_deref(), Some("*"));
        let power = &product.children[0];
        assert_eq!(power.value.as_deref(), Some("^"));
        assert_eq!(power.children[0].caption(), "2");
        assert_eq!(power.children[1].caption(), "3");
    }

    #[test]
    fn test_parentheses_group() {
        let root = parse_clean("main{x=(1+2)*3;}");
        let product = &root.children[0].children[1];
        assert_eq!(product.value.as_deref(), Some("*"));
        assert_eq!(product.children[0].value.as_deref(), Some("+"));
        assert_eq!(product.children[1].caption(), "3");
    }

    #[test]
    fn test_logical_operators_chain() {
        let root = parse_clean("main{cout a and b or c;}");
        let or = &root.children[0].children[0];
        assert_eq!(or.label, NodeLabel::LogicalOp);
        assert_eq!(or.value.as_deref(), Some("or"));
        assert_eq!(or.children[0].value.as_deref(), Some("and"));
        assert_eq!(or.children[1].caption(), "c");
    }

    #[test]
    fn test_comparison_with_logical_operands() {
        let root = parse_clean("main{if(a == b and c){x=1;}}");
        let comparison = &root.children[0].children[0];
        assert_eq!(comparison.label, NodeLabel::Comparison);
        assert_eq!(comparison.value.as_deref(), Some("=="));
        assert_eq!(comparison.children[0].caption(), "a");
        assert_eq!(comparison.children[1].label, NodeLabel::LogicalOp);
    }

    #[test]
    fn test_folded_negative_literal_in_expression() {
        let root = parse_clean("main{x=-5;}");
        let number = &root.children[0].children[1];
        assert_eq!(number.label, NodeLabel::Number);
        assert_eq!(number.caption(), "-5");
    }

    // =========================================================================
    // Error recovery
    // =========================================================================

    #[test]
    fn test_missing_closing_brace_recovers() {
        let (root, errors) = parse_source("main{if(a){b=1;}");
        assert!(!errors.is_empty());
        let errors_node = root.children.last().expect("Errors subtree");
        assert_eq!(errors_node.label, NodeLabel::Errors);
        assert_eq!(errors_node.children.len(), errors.len());
        assert!(errors_node
            .children
            .iter()
            .all(|c| c.label == NodeLabel::Error));
    }

    #[test]
    fn test_mismatch_message_names_expected_and_found() {
        let (_, errors) = parse_source("main{int a}");
        assert!(!errors.is_empty());
        assert!(errors[0].message.contains("expected ';'"));
        assert!(errors[0].message.contains("found SYMBOL '}'"));
    }

    #[test]
    fn test_recovery_continues_with_next_statement() {
        let (root, errors) = parse_source("main{a=+;b=2;}");
        assert_eq!(errors.len(), 1);
        // The broken assignment is dropped; the next one survives.
        assert_eq!(
            child_labels(&root),
            vec![NodeLabel::Assignment, NodeLabel::Errors]
        );
        assert_eq!(root.children[0].children[0].caption(), "b");
    }

    #[test]
    fn test_unexpected_statement_start() {
        let (root, errors) = parse_source("main{else;}");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("unexpected token"));
        assert_eq!(child_labels(&root), vec![NodeLabel::Errors]);
    }

    #[test]
    fn test_error_positions_point_at_found_token() {
        let (_, errors) = parse_source("main{int a}");
        assert_eq!(errors[0].line, 1);
        assert_eq!(errors[0].column, 11);
    }

    #[test]
    fn test_empty_token_list() {
        let (root, errors) = Parser::new(Vec::new()).parse();
        assert_eq!(root.label, NodeLabel::Program);
        assert!(root.value.is_none());
        assert!(errors[0].message.contains("expected 'main'"));
        assert!(errors[0].message.contains("end of input"));
    }

    #[test]
    fn test_terminates_on_junk_stream() {
        let (tokens, _) = Scanner::analyze("+ + +");
        let (root, errors) = Parser::new(tokens).parse();
        assert_eq!(root.label, NodeLabel::Program);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_terminates_on_truncated_input() {
        // Statement keyword with nothing after it.
        let (root, errors) = parse_source("main{while");
        assert_eq!(root.label, NodeLabel::Program);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_lexical_and_parse_channels_are_independent() {
        let (tokens, lex_errors) = Scanner::analyze("main{x = #1;}");
        assert_eq!(lex_errors.len(), 1);
        let (root, parse_errors) = Parser::new(tokens).parse();
        // The `#` never reaches the parser; the remaining tokens parse clean.
        assert!(parse_errors.is_empty());
        assert_eq!(child_labels(&root), vec![NodeLabel::Assignment]);
    }

    #[test]
    fn test_full_program() {
        let source = "main {\n    int a, b;\n    double total;\n    cin a;\n    total = 0;\n    while (a > 0) {\n        total = total + a ^ 2;\n        a--;\n    }\n    if (total >= 100) {\n        cout total;\n    } else {\n        cout 0;\n    }\n}\n";
        let root = parse_clean(source);
        assert_eq!(
            child_labels(&root),
            vec![
                NodeLabel::VariableDeclaration,
                NodeLabel::VariableDeclaration,
                NodeLabel::Input,
                NodeLabel::Assignment,
                NodeLabel::While,
                NodeLabel::If,
            ]
        );
    }
}
