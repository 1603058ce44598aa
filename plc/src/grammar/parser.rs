use super::parsercore::{Compilation, Parser};
use super::token::{Token, TokenKind, TokenKind::*};
use crate::error::{Error, SemanticError, SyntaxError};
use crate::sink::Sink;
use crate::symbols::Type;
use crate::{optional, repeat};
use log::info;
use mepa::Inst;

impl<'a, S: Sink> Parser<'a, S> {
    /// Compile a whole program, stopping at the first error.
    pub fn parse(mut self) -> Result<Compilation<S>, Error> {
        self.parse_program()?;
        if let Some(token) = self.lookahead() {
            return Err(SyntaxError::TrailingInput {
                found: token.kind,
                line: token.line,
            }
            .into());
        }
        debug_assert!(self.labels.pending().next().is_none());

        let unit = self.finish();
        info!("{} lines analysed, program is correct", unit.lines);
        Ok(unit)
    }
}

// ----------------------------------------------------------------------------
// Program structure
// ----------------------------------------------------------------------------

impl<'a, S: Sink> Parser<'a, S> {
    /// program = "program" ident [ "(" ident-list ")" ] ";" block "."
    fn parse_program(&mut self) -> Result<(), Error> {
        self.emit(Inst::INPP)?;

        self.consume(Program)?;
        self.consume(Ident)?;
        optional!(self, LParen, {
            self.parse_ident_list()?;
            self.consume(RParen)?
        });
        self.consume(Semicolon)?;
        self.parse_block()?;
        self.consume(Period)?;

        self.emit(Inst::PARA)
    }

    /// block = [ declarations ] compound-stmt
    fn parse_block(&mut self) -> Result<(), Error> {
        if self.check(Var) {
            self.parse_declarations()?;
        }
        self.parse_compound()
    }

    /// declarations = "var" declaration ";" { declaration ";" }
    fn parse_declarations(&mut self) -> Result<(), Error> {
        self.consume(Var)?;
        let mut count = 0;
        loop {
            count += self.parse_declaration()?;
            self.consume(Semicolon)?;
            if !self.check(Ident) {
                break;
            }
        }
        // One reservation for the whole section
        self.emit(Inst::AMEM(count))
    }

    /// declaration = ident-list ":" type
    fn parse_declaration(&mut self) -> Result<usize, Error> {
        let idents = self.parse_ident_list()?;
        self.consume(Colon)?;
        let ty = self.parse_type()?;
        for ident in &idents {
            self.symbols.declare(ident.lexeme, ty, ident.line)?;
        }
        Ok(idents.len())
    }

    /// ident-list = ident { "," ident }
    fn parse_ident_list(&mut self) -> Result<Vec<Token<'a>>, Error> {
        Ok(repeat!(self, self.consume(Ident), Comma))
    }

    /// type = "integer" | "boolean"
    fn parse_type(&mut self) -> Result<Type, Error> {
        let ty = match self.peek() {
            Some(Integer) => Type::Integer,
            Some(Boolean) => Type::Boolean,
            _ => {
                return Err(SemanticError::InvalidType {
                    found: self
                        .lookahead()
                        .map_or_else(|| "EOF".to_string(), |t| t.lexeme.to_string()),
                    line: self.line(),
                }
                .into())
            }
        };
        self.next()?;
        Ok(ty)
    }
}

// ----------------------------------------------------------------------------
// Statements
// ----------------------------------------------------------------------------

impl<'a, S: Sink> Parser<'a, S> {
    /// compound-stmt = "begin" [ stmt ] { ";" [ stmt ] } "end"
    fn parse_compound(&mut self) -> Result<(), Error> {
        self.consume(Begin)?;
        repeat!(self, self.parse_optional_stmt(), Semicolon);
        self.consume(End)?;
        Ok(())
    }

    /// [ stmt ] : nothing before "end"
    fn parse_optional_stmt(&mut self) -> Result<(), Error> {
        if self.check(End) {
            return Ok(());
        }
        self.parse_stmt()
    }

    /// stmt = assign-stmt | if-stmt | while-stmt | read-stmt | write-stmt | compound-stmt
    fn parse_stmt(&mut self) -> Result<(), Error> {
        self.enter()?;
        match self.peek() {
            Some(Ident) => self.parse_assign()?,
            Some(If) => self.parse_if()?,
            Some(While) => self.parse_while()?,
            Some(Read) => self.parse_read()?,
            Some(Write) => self.parse_write()?,
            Some(Begin) => self.parse_compound()?,
            found => {
                return Err(SyntaxError::InvalidStatement {
                    found,
                    line: self.line(),
                }
                .into())
            }
        }
        self.leave();
        Ok(())
    }

    /// assign-stmt = ident ":=" expr
    fn parse_assign(&mut self) -> Result<(), Error> {
        let ident = self.consume(Ident)?;
        let addr = self.symbols.resolve(ident.lexeme, ident.line)?;
        self.consume(Assign)?;
        self.parse_expr()?;
        self.emit(Inst::ARMZ(addr))
    }

    /// if-stmt = "if" expr "then" stmt [ "else" stmt ]
    fn parse_if(&mut self) -> Result<(), Error> {
        self.consume(If)?;
        self.parse_expr()?;
        let l_false = self.labels.allocate();
        self.emit(Inst::DSVF(l_false))?;
        self.consume(Then)?;
        self.parse_stmt()?;

        if self.check(Else) {
            let l_exit = self.labels.allocate();
            self.emit(Inst::DSVS(l_exit))?;
            self.define(l_false)?;
            self.consume(Else)?;
            self.parse_stmt()?;
            self.define(l_exit)
        } else {
            self.define(l_false)
        }
    }

    /// while-stmt = "while" expr "do" stmt
    fn parse_while(&mut self) -> Result<(), Error> {
        let l_test = self.labels.allocate();
        let l_exit = self.labels.allocate();

        self.consume(While)?;
        self.define(l_test)?;
        self.parse_expr()?;
        self.emit(Inst::DSVF(l_exit))?;
        self.consume(Do)?;
        self.parse_stmt()?;
        self.emit(Inst::DSVS(l_test))?;
        self.define(l_exit)
    }

    /// read-stmt = "read" "(" ident { "," ident } ")"
    fn parse_read(&mut self) -> Result<(), Error> {
        self.consume(Read)?;
        self.consume(LParen)?;
        repeat!(self, self.parse_read_target(), Comma);
        self.consume(RParen)?;
        Ok(())
    }

    /// One variable of a read: LEIT, then store into it
    fn parse_read_target(&mut self) -> Result<(), Error> {
        let ident = self.consume(Ident)?;
        let addr = self.symbols.resolve(ident.lexeme, ident.line)?;
        self.emit(Inst::LEIT)?;
        self.emit(Inst::ARMZ(addr))
    }

    /// write-stmt = "write" "(" expr { "," expr } ")"
    fn parse_write(&mut self) -> Result<(), Error> {
        self.consume(Write)?;
        self.consume(LParen)?;
        repeat!(self, self.parse_write_item(), Comma);
        self.consume(RParen)?;
        Ok(())
    }

    /// One argument of a write: its value, then IMPR
    fn parse_write_item(&mut self) -> Result<(), Error> {
        self.parse_expr()?;
        self.emit(Inst::IMPR)
    }
}

// ----------------------------------------------------------------------------
// Expressions
// ----------------------------------------------------------------------------

fn relational(kind: TokenKind) -> Option<Inst> {
    match kind {
        Less => Some(Inst::CMME),
        Greater => Some(Inst::CMMA),
        Equal => Some(Inst::CMIG),
        NotEqual => Some(Inst::CMDG),
        LessEqual => Some(Inst::CMEG),
        GreaterEqual => Some(Inst::CMAG),
        _ => None,
    }
}

fn additive(kind: TokenKind) -> Option<Inst> {
    match kind {
        Plus => Some(Inst::SOMA),
        Minus => Some(Inst::SUBT),
        Or => Some(Inst::DISJ),
        _ => None,
    }
}

fn multiplicative(kind: TokenKind) -> Option<Inst> {
    match kind {
        Star => Some(Inst::MULT),
        Slash | Div => Some(Inst::DIVI),
        Mod => Some(Inst::MODI),
        And => Some(Inst::CONJ),
        _ => None,
    }
}

impl<'a, S: Sink> Parser<'a, S> {
    /// expr = simple-expr [ relop simple-expr ]
    fn parse_expr(&mut self) -> Result<(), Error> {
        self.enter()?;
        self.parse_simple_expr()?;
        if let Some(op) = self.peek().and_then(relational) {
            self.next()?;
            self.parse_simple_expr()?;
            self.emit(op)?;
        }
        self.leave();
        Ok(())
    }

    /// simple-expr = term { ( "+" | "-" | "or" ) term }
    fn parse_simple_expr(&mut self) -> Result<(), Error> {
        self.parse_term()?;
        while let Some(op) = self.peek().and_then(additive) {
            self.next()?;
            self.parse_term()?;
            self.emit(op)?;
        }
        Ok(())
    }

    /// term = factor { ( "*" | "/" | "div" | "mod" | "and" ) factor }
    fn parse_term(&mut self) -> Result<(), Error> {
        self.parse_factor()?;
        while let Some(op) = self.peek().and_then(multiplicative) {
            self.next()?;
            self.parse_factor()?;
            self.emit(op)?;
        }
        Ok(())
    }

    /// factor = ident | number | "true" | "false" | "(" expr ")"
    ///        | "not" factor | "-" factor | "+" factor
    fn parse_factor(&mut self) -> Result<(), Error> {
        let Some(token) = self.lookahead() else {
            return Err(SyntaxError::ExpectedExpression {
                found: None,
                line: self.line(),
            }
            .into());
        };

        match token.kind {
            Ident => {
                self.next()?;
                let addr = self.symbols.resolve(token.lexeme, token.line)?;
                self.emit(Inst::CRVL(addr))
            }
            Number => {
                self.next()?;
                self.emit(Inst::CRCT(token.value.unwrap_or_default()))
            }
            True => {
                self.next()?;
                self.emit(Inst::CRCT(1))
            }
            False => {
                self.next()?;
                self.emit(Inst::CRCT(0))
            }
            LParen => {
                self.next()?;
                self.parse_expr()?;
                self.consume(RParen)?;
                Ok(())
            }
            Not => {
                self.next()?;
                self.parse_unary_operand()?;
                self.emit(Inst::NEGA)
            }
            Minus => {
                self.next()?;
                self.parse_unary_operand()?;
                self.emit(Inst::INVR)
            }
            Plus => {
                self.next()?;
                self.parse_unary_operand()
            }
            found => Err(SyntaxError::ExpectedExpression {
                found: Some(found),
                line: token.line,
            }
            .into()),
        }
    }

    /// Operand of a prefix operator, counted as one nesting level
    fn parse_unary_operand(&mut self) -> Result<(), Error> {
        self.enter()?;
        self.parse_factor()?;
        self.leave();
        Ok(())
    }
}
