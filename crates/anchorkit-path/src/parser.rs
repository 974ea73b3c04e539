//! Path data parser.
//!
//! Accepts the SVG path grammar minus arcs: `M L H V Q T C S Z` in absolute
//! (uppercase) and relative (lowercase) form. Numbers may be separated by
//! whitespace, commas, or nothing at all when the sign or a second decimal
//! point makes the boundary unambiguous (`10-5`, `.5.5`). Every command is
//! resolved to absolute `Move`/`Line`/`Quad`/`Cubic`/`Close` instructions;
//! the result is not yet normalized.

use anchorkit_core::{ParseError, ParseResult, Point};

use crate::instruction::Instruction;

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    Command(char),
    Number(f64, &'a str),
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.peek_byte() {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek_byte(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn number(&mut self) -> ParseResult<Token<'a>> {
        let start = self.pos;
        if matches!(self.peek_byte(), Some(b'+') | Some(b'-')) {
            self.pos += 1;
        }
        let mut digits = self.eat_digits();
        if self.peek_byte() == Some(b'.') {
            self.pos += 1;
            digits += self.eat_digits();
        }
        if digits > 0 && matches!(self.peek_byte(), Some(b'e') | Some(b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek_byte(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            if self.eat_digits() == 0 {
                // Not an exponent after all
                self.pos = mark;
            }
        }
        let text = &self.src[start..self.pos];
        if digits == 0 {
            return Err(ParseError::InvalidNumber {
                text: text.to_string(),
                offset: start,
            });
        }
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Token::Number(v, text)),
            _ => Err(ParseError::InvalidNumber {
                text: text.to_string(),
                offset: start,
            }),
        }
    }

    fn next_token(&mut self) -> Option<ParseResult<(Token<'a>, usize)>> {
        self.skip_separators();
        let offset = self.pos;
        let ch = self.src[offset..].chars().next()?;
        if ch.is_ascii_alphabetic() && ch != 'e' && ch != 'E' {
            self.pos += 1;
            return Some(Ok((Token::Command(ch), offset)));
        }
        if ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.') {
            return Some(self.number().map(|t| (t, offset)));
        }
        Some(Err(ParseError::UnexpectedCharacter { ch, offset }))
    }

    fn tokenize(mut self) -> ParseResult<Vec<(Token<'a>, usize)>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token?);
        }
        Ok(tokens)
    }
}

fn arity(command: char) -> Option<usize> {
    match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => Some(2),
        'H' | 'V' => Some(1),
        'Q' | 'S' => Some(4),
        'C' => Some(6),
        'Z' => Some(0),
        _ => None,
    }
}

/// Resolves relative commands and smooth-curve reflections.
#[derive(Default)]
struct PenState {
    current: Point,
    subpath_start: Point,
    last_cubic_ctrl: Option<Point>,
    last_quad_ctrl: Option<Point>,
    open: bool,
    closed_last: bool,
}

/// Parses path data into absolute instructions.
///
/// An empty or whitespace-only string yields an empty list.
pub fn parse_instructions(data: &str) -> ParseResult<Vec<Instruction>> {
    let tokens = Lexer::new(data).tokenize()?;
    let mut out: Vec<Instruction> = Vec::new();
    let mut pen = PenState::default();
    let mut i = 0;

    while i < tokens.len() {
        let (command, cmd_offset) = match &tokens[i] {
            (Token::Command(c), off) => (*c, *off),
            (Token::Number(_, text), off) => {
                return Err(ParseError::UnexpectedCharacter {
                    ch: text.chars().next().unwrap_or('?'),
                    offset: *off,
                })
            }
        };
        i += 1;

        if matches!(command, 'A' | 'a') {
            return Err(ParseError::UnsupportedCommand {
                command,
                offset: cmd_offset,
            });
        }
        let n = arity(command).ok_or(ParseError::UnknownCommand {
            command,
            offset: cmd_offset,
        })?;

        if command.eq_ignore_ascii_case(&'z') {
            if !pen.open {
                return Err(ParseError::MissingInitialMove { offset: cmd_offset });
            }
            if !pen.closed_last {
                out.push(Instruction::Close);
                pen.current = pen.subpath_start;
                pen.closed_last = true;
            }
            pen.last_cubic_ctrl = None;
            pen.last_quad_ctrl = None;
            if let Some((Token::Number(_, text), off)) = tokens.get(i) {
                return Err(ParseError::UnexpectedCharacter {
                    ch: text.chars().next().unwrap_or('?'),
                    offset: *off,
                });
            }
            continue;
        }

        let is_move = command.eq_ignore_ascii_case(&'m');
        if !is_move && !pen.open {
            return Err(ParseError::MissingInitialMove { offset: cmd_offset });
        }

        // A drawing command right after a close reopens at the subpath start.
        if !is_move && pen.closed_last {
            out.push(Instruction::Move(pen.subpath_start));
            pen.closed_last = false;
        }

        let mut first = true;
        loop {
            let mut values = [0.0f64; 6];
            let mut found = 0;
            while found < n {
                match tokens.get(i) {
                    Some((Token::Number(v, _), _)) => {
                        values[found] = *v;
                        found += 1;
                        i += 1;
                    }
                    _ => break,
                }
            }
            if found < n {
                if first || found > 0 {
                    return Err(ParseError::MissingCoordinates {
                        command,
                        offset: cmd_offset,
                        expected: n,
                        found,
                    });
                }
                break;
            }

            // Implicit repeats of a move are line-tos.
            let effective = if is_move && !first {
                if command.is_ascii_lowercase() {
                    'l'
                } else {
                    'L'
                }
            } else {
                command
            };
            let emitted = out.len();
            emit(effective, &values[..n], &mut pen, &mut out);
            // relative offsets can still overflow
            if !out[emitted..].iter().all(Instruction::is_finite) {
                return Err(ParseError::NonFiniteCoordinate {
                    command,
                    offset: cmd_offset,
                });
            }
            first = false;

            if !matches!(tokens.get(i), Some((Token::Number(..), _))) {
                break;
            }
        }
    }

    Ok(out)
}

fn emit(command: char, v: &[f64], pen: &mut PenState, out: &mut Vec<Instruction>) {
    let relative = command.is_ascii_lowercase();
    let base = if relative { pen.current } else { Point::ORIGIN };
    let pt = |x: f64, y: f64| Point::new(base.x + x, base.y + y);

    let mut cubic_ctrl = None;
    let mut quad_ctrl = None;
    match command.to_ascii_uppercase() {
        'M' => {
            let to = pt(v[0], v[1]);
            out.push(Instruction::Move(to));
            pen.current = to;
            pen.subpath_start = to;
            pen.open = true;
            pen.closed_last = false;
        }
        'L' => {
            let to = pt(v[0], v[1]);
            out.push(Instruction::Line(to));
            pen.current = to;
        }
        'H' => {
            let x = if relative { pen.current.x + v[0] } else { v[0] };
            let to = Point::new(x, pen.current.y);
            out.push(Instruction::Line(to));
            pen.current = to;
        }
        'V' => {
            let y = if relative { pen.current.y + v[0] } else { v[0] };
            let to = Point::new(pen.current.x, y);
            out.push(Instruction::Line(to));
            pen.current = to;
        }
        'Q' => {
            let ctrl = pt(v[0], v[1]);
            let to = pt(v[2], v[3]);
            out.push(Instruction::Quad { ctrl, to });
            pen.current = to;
            quad_ctrl = Some(ctrl);
        }
        'T' => {
            let ctrl = pen
                .last_quad_ctrl
                .map(|c| c.reflect_through(pen.current))
                .unwrap_or(pen.current);
            let to = pt(v[0], v[1]);
            out.push(Instruction::Quad { ctrl, to });
            pen.current = to;
            quad_ctrl = Some(ctrl);
        }
        'C' => {
            let ctrl1 = pt(v[0], v[1]);
            let ctrl2 = pt(v[2], v[3]);
            let to = pt(v[4], v[5]);
            out.push(Instruction::Cubic { ctrl1, ctrl2, to });
            pen.current = to;
            cubic_ctrl = Some(ctrl2);
        }
        'S' => {
            let ctrl1 = pen
                .last_cubic_ctrl
                .map(|c| c.reflect_through(pen.current))
                .unwrap_or(pen.current);
            let ctrl2 = pt(v[0], v[1]);
            let to = pt(v[2], v[3]);
            out.push(Instruction::Cubic { ctrl1, ctrl2, to });
            pen.current = to;
            cubic_ctrl = Some(ctrl2);
        }
        _ => {}
    }
    pen.last_cubic_ctrl = cubic_ctrl;
    pen.last_quad_ctrl = quad_ctrl;
}
