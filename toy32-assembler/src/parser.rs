//! Assembly parser
//!
//! Parsing happens in two steps. [`parse_line`] turns one source line into a
//! [`Line`] without looking at any symbol table. Once the operands have been
//! resolved, [`build_instruction`] checks them against the opcode's shape and
//! produces an [`Instruction`].

use logos::Logos;
use toy32_spec::{Instruction, Opcode, OpcodeClass};

use crate::error::{AssemblerError, Result};
use crate::lexer::Token;
use crate::symbols::Resolved;

/// An unresolved instruction operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Integer literal
    Number(i64),
    /// Register, data constant or label name
    Symbol(String),
    /// `&name`: address of a data constant
    AddressOf(String),
}

/// One meaningful source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `.name`
    Directive(String),
    /// `name = integer`
    Assignment { name: String, value: i64 },
    /// `MNEMONIC operand, ...`
    Statement {
        mnemonic: String,
        operands: Vec<Operand>,
    },
}

/// Parse a single source line. Blank and comment-only lines yield `None`.
pub fn parse_line(text: &str, line: usize) -> Result<Option<Line>> {
    let mut tokens = Vec::new();
    for (token, span) in Token::lexer(text).spanned() {
        match token {
            Ok(Token::Comma) => {}
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(AssemblerError::SyntaxError {
                    line,
                    column: span.start + 1,
                    message: format!("unexpected `{}`", &text[span]),
                })
            }
        }
    }

    let Some(first) = tokens.first() else {
        return Ok(None);
    };

    match first {
        Token::Directive(name) => {
            if tokens.len() > 1 {
                return Err(syntax(line, "unexpected tokens after directive"));
            }
            Ok(Some(Line::Directive(name.clone())))
        }
        Token::Identifier(name) if tokens.contains(&Token::Equals) => {
            parse_assignment(name, &tokens[1..], line).map(Some)
        }
        Token::Identifier(mnemonic) => {
            let operands = parse_operands(&tokens[1..], line)?;
            Ok(Some(Line::Statement {
                mnemonic: mnemonic.clone(),
                operands,
            }))
        }
        _ => Err(syntax(line, "expected an instruction, directive or data definition")),
    }
}

fn parse_assignment(name: &str, rest: &[Token], line: usize) -> Result<Line> {
    match rest {
        [Token::Equals, Token::Number(value)] | [Token::Equals, Token::Hex(value)] => {
            Ok(Line::Assignment {
                name: name.to_string(),
                value: *value,
            })
        }
        _ => Err(AssemblerError::InvalidDataDefinition {
            line,
            message: format!("expected `{} = integer`", name),
        }),
    }
}

fn parse_operands(tokens: &[Token], line: usize) -> Result<Vec<Operand>> {
    let mut operands = Vec::with_capacity(tokens.len());
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        let operand = match token {
            Token::Number(n) | Token::Hex(n) => Operand::Number(*n),
            Token::Identifier(name) => Operand::Symbol(name.clone()),
            Token::Ampersand => match iter.next() {
                Some(Token::Identifier(name)) => Operand::AddressOf(name.clone()),
                _ => return Err(syntax(line, "expected a data symbol after `&`")),
            },
            Token::Directive(name) => {
                return Err(syntax(line, &format!("unexpected directive `.{}` in operands", name)))
            }
            Token::Equals => return Err(syntax(line, "unexpected `=` in operands")),
            Token::Comma => continue,
        };
        operands.push(operand);
    }

    Ok(operands)
}

fn syntax(line: usize, message: &str) -> AssemblerError {
    AssemblerError::SyntaxError {
        line,
        column: 0,
        message: message.to_string(),
    }
}

/// Operand shape expected by each opcode
fn usage(opcode: Opcode) -> &'static str {
    match opcode.class() {
        OpcodeClass::RegisterMove => "expected `MOV dst, src` or `MOV dst, imm`",
        OpcodeClass::RegisterWide => match opcode {
            Opcode::Store => "expected `STORE address, reg`",
            _ => "expected `LOAD reg, address`",
        },
        OpcodeClass::Alu => "expected `dst, src` or `dst, src1, src2` registers",
        OpcodeClass::Unary => "expected a single register",
        OpcodeClass::Jump => "expected a single address or label",
        OpcodeClass::Return => "expected no operands",
    }
}

/// Build an instruction from a mnemonic and resolved operands
pub fn build_instruction(mnemonic: &str, operands: &[Resolved], line: usize) -> Result<Instruction> {
    use crate::symbols::Resolved::{Register as Reg, Word};

    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| AssemblerError::UnknownInstruction {
        line,
        instruction: mnemonic.to_string(),
    })?;

    let invalid = || AssemblerError::InvalidOperands {
        line,
        mnemonic: opcode.mnemonic().to_string(),
        message: usage(opcode).to_string(),
    };

    let instr = match (opcode.class(), operands) {
        (OpcodeClass::RegisterMove, [Reg(dst), Reg(src)]) => Instruction::Mov {
            dst: *dst,
            src: *src,
        },
        (OpcodeClass::RegisterMove, [Reg(dst), Word(imm)]) => Instruction::MovImm {
            dst: *dst,
            imm: *imm,
        },
        (OpcodeClass::RegisterWide, [Reg(reg), Word(address)]) if opcode == Opcode::Load => {
            Instruction::Load {
                reg: *reg,
                address: *address,
            }
        }
        (OpcodeClass::RegisterWide, [Word(address), Reg(reg)]) if opcode == Opcode::Store => {
            Instruction::Store {
                address: *address,
                reg: *reg,
            }
        }
        // Two-operand form: dst is also the first source
        (OpcodeClass::Alu, [Reg(dst), Reg(src)]) => {
            Instruction::alu(opcode, *dst, *src, *dst).ok_or_else(invalid)?
        }
        (OpcodeClass::Alu, [Reg(dst), Reg(src1), Reg(src2)]) => {
            Instruction::alu(opcode, *src1, *src2, *dst).ok_or_else(invalid)?
        }
        (OpcodeClass::Unary, [Reg(reg)]) => Instruction::unary(opcode, *reg).ok_or_else(invalid)?,
        (OpcodeClass::Jump, [Word(address)]) => {
            Instruction::jump(opcode, *address).ok_or_else(invalid)?
        }
        (OpcodeClass::Return, []) => Instruction::Ret,
        _ => return Err(invalid()),
    };

    Ok(instr)
}
