use hourglass_input::bounds::DurationBounds;
use hourglass_input::controller::DurationProps;
use hourglass_input::unit::{Unit, UnitSet};

use super::error::ScriptError;
use super::lexer::{Lexer, Token, TokenWithPos};

// ── Command ───────────────────────────────────────────────────────────────

/// One line of a studio script.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `input hours+minutes min=60 max=5400 value=0 default=0`
    Input { units: UnitSet, props: DurationProps },
    /// `focus hour`: pointer press on a field.
    Focus(Unit),
    /// `tab` / `backtab`
    Tab { reverse: bool },
    /// `blur`: pointer press outside the input.
    Blur,
    /// `escape`
    Escape,
    /// `type "12"`
    Type(String),
    /// `replace "12"`
    Replace(String),
    /// `clear`: replace with empty text.
    Clear,
    Backspace,
    /// `up` / `down`
    Step { up: bool },
    /// `echo 5400`: the owner pushes a value.
    Echo(u64),
    /// `bounds min=0 max=7200`: the owner changes the range.
    Bounds(DurationBounds),
    Show,
}

impl Command {
    /// Script keyword for this command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Input { .. } => "input",
            Command::Focus(_) => "focus",
            Command::Tab { reverse: false } => "tab",
            Command::Tab { reverse: true } => "backtab",
            Command::Blur => "blur",
            Command::Escape => "escape",
            Command::Type(_) => "type",
            Command::Replace(_) => "replace",
            Command::Clear => "clear",
            Command::Backspace => "backspace",
            Command::Step { up: true } => "up",
            Command::Step { up: false } => "down",
            Command::Echo(_) => "echo",
            Command::Bounds(_) => "bounds",
            Command::Show => "show",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub command: Command,
    /// 1-based line the command starts on.
    pub line: usize,
}

const KEYWORDS: &[&str] = &[
    "input", "focus", "tab", "backtab", "blur", "escape", "type", "replace",
    "clear", "backspace", "up", "down", "echo", "bounds", "show",
];

// ── Parser ────────────────────────────────────────────────────────────────

pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current_pos(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .map(|t| (t.line, t.col))
            .or_else(|| self.tokens.last().map(|t| (t.line, t.col)))
            .unwrap_or((1, 1))
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.get(self.pos).map(|t| t.token.clone()).unwrap_or(Token::Eof);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> ScriptError {
        let (line, col) = self.current_pos();
        ScriptError::new(msg, line, col)
    }

    fn expect_ident(&mut self) -> Result<String, ScriptError> {
        match self.peek().clone() {
            Token::Ident(s) => { self.advance(); Ok(s) }
            tok => Err(self.err(format!("expected a name, got {:?}", tok))),
        }
    }

    fn expect_number(&mut self) -> Result<u64, ScriptError> {
        match self.peek().clone() {
            Token::Number(n) => { self.advance(); Ok(n) }
            tok => Err(self.err(format!("expected a number, got {:?}", tok))),
        }
    }

    /// Text argument: a quoted string or a bare number.
    fn expect_text(&mut self) -> Result<String, ScriptError> {
        match self.peek().clone() {
            Token::Str(s) => { self.advance(); Ok(s) }
            Token::Number(n) => { self.advance(); Ok(n.to_string()) }
            tok => Err(self.err(format!("expected text, got {:?}", tok))),
        }
    }

    fn expect_end_of_command(&mut self) -> Result<(), ScriptError> {
        match self.peek() {
            Token::Newline => { self.advance(); Ok(()) }
            Token::Eof => Ok(()),
            tok => Err(self.err(format!("unexpected {:?} after command", tok))),
        }
    }

    // ── Script ────────────────────────────────────────────────────────────

    pub fn parse_script(&mut self) -> Result<Vec<Statement>, ScriptError> {
        let mut statements = Vec::new();
        while self.peek() != &Token::Eof {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Statement, ScriptError> {
        let (line, col) = self.current_pos();
        let name = self.expect_ident()?;
        let Some(kw) = KEYWORDS.iter().copied().find(|k| *k == name) else {
            return Err(ScriptError::new(format!("unknown command {:?}", name), line, col));
        };
        let command = self.parse_command(kw).map_err(|e| e.in_command(kw))?;
        self.expect_end_of_command().map_err(|e| e.in_command(kw))?;
        Ok(Statement { command, line })
    }

    fn parse_command(&mut self, kw: &str) -> Result<Command, ScriptError> {
        let command = match kw {
            "input" => self.parse_input()?,
            "focus" => Command::Focus(self.parse_unit()?),
            "tab" => Command::Tab { reverse: false },
            "backtab" => Command::Tab { reverse: true },
            "blur" => Command::Blur,
            "escape" => Command::Escape,
            "type" => Command::Type(self.expect_text()?),
            "replace" => Command::Replace(self.expect_text()?),
            "clear" => Command::Clear,
            "backspace" => Command::Backspace,
            "up" => Command::Step { up: true },
            "down" => Command::Step { up: false },
            "echo" => Command::Echo(self.expect_number()?),
            "bounds" => self.parse_bounds()?,
            "show" => Command::Show,
            other => return Err(self.err(format!("unknown command {:?}", other))),
        };
        Ok(command)
    }

    // ── Arguments ─────────────────────────────────────────────────────────

    fn parse_unit(&mut self) -> Result<Unit, ScriptError> {
        let (line, col) = self.current_pos();
        let name = self.expect_ident()?;
        unit_named(&name).ok_or_else(|| ScriptError::new(format!("unknown unit {:?}", name), line, col))
    }

    /// `hours`, `minutes`, `hours+minutes`.
    fn parse_units(&mut self) -> Result<UnitSet, ScriptError> {
        let mut units = UnitSet::EMPTY.with(self.parse_unit()?);
        while self.peek() == &Token::Plus {
            self.advance();
            units.insert(self.parse_unit()?);
        }
        Ok(units)
    }

    /// Zero or more `key=number` pairs.
    fn parse_options(&mut self, allowed: &[&str]) -> Result<Vec<(String, u64)>, ScriptError> {
        let mut options = Vec::new();
        while matches!(self.peek(), Token::Ident(_)) {
            let (line, col) = self.current_pos();
            let key = self.expect_ident()?;
            if !allowed.contains(&key.as_str()) {
                return Err(ScriptError::new(
                    format!("unknown option {:?}, expected one of {}", key, allowed.join(", ")),
                    line,
                    col,
                ));
            }
            if self.advance() != Token::Eq {
                return Err(self.err(format!("expected '=' after {}", key)));
            }
            options.push((key, self.expect_number()?));
        }
        Ok(options)
    }

    fn parse_input(&mut self) -> Result<Command, ScriptError> {
        let units = self.parse_units()?;
        let mut props = DurationProps::new();
        for (key, n) in self.parse_options(&["min", "max", "value", "default"])? {
            props = match key.as_str() {
                "min" => props.min(n),
                "max" => props.max(n),
                "value" => props.value(n),
                _ => props.default_value(n),
            };
        }
        Ok(Command::Input { units, props })
    }

    fn parse_bounds(&mut self) -> Result<Command, ScriptError> {
        let mut bounds = DurationBounds::new();
        for (key, n) in self.parse_options(&["min", "max"])? {
            bounds = match key.as_str() {
                "min" => bounds.min(n),
                _ => bounds.max(n),
            };
        }
        Ok(Command::Bounds(bounds))
    }
}

fn unit_named(name: &str) -> Option<Unit> {
    match name {
        "h" | "hour" | "hours" => Some(Unit::Hour),
        "m" | "minute" | "minutes" => Some(Unit::Minute),
        _ => None,
    }
}

// ── Public parse entry point ──────────────────────────────────────────────

/// Parse a studio script into statements.
pub fn parse_script(src: &str) -> Result<Vec<Statement>, ScriptError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_script()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(src: &str) -> Vec<Command> {
        parse_script(src).unwrap().into_iter().map(|s| s.command).collect()
    }

    #[test]
    fn input_header_with_options() {
        let cmds = commands("input hours+minutes min=60 max=5400 default=120");
        assert_eq!(
            cmds,
            vec![Command::Input {
                units: UnitSet::HOURS_AND_MINUTES,
                props: DurationProps::new().min(60).max(5400).default_value(120),
            }],
        );
    }

    #[test]
    fn single_unit_aliases() {
        assert_eq!(
            commands("input m\nfocus minute"),
            vec![
                Command::Input { units: UnitSet::MINUTES, props: DurationProps::new() },
                Command::Focus(Unit::Minute),
            ],
        );
    }

    #[test]
    fn editing_commands() {
        let cmds = commands("type \"4\"\nreplace 12\nclear\nbackspace\nup\ndown\nbacktab\necho 60\nshow");
        assert_eq!(
            cmds,
            vec![
                Command::Type("4".into()),
                Command::Replace("12".into()),
                Command::Clear,
                Command::Backspace,
                Command::Step { up: true },
                Command::Step { up: false },
                Command::Tab { reverse: true },
                Command::Echo(60),
                Command::Show,
            ],
        );
    }

    #[test]
    fn bounds_command() {
        assert_eq!(
            commands("bounds max=7200"),
            vec![Command::Bounds(DurationBounds::new().max(7200))],
        );
    }

    #[test]
    fn statements_remember_their_line() {
        let stmts = parse_script("# setup\ninput hours\n\ntab\n").unwrap();
        assert_eq!(stmts.iter().map(|s| s.line).collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn err_unknown_command() {
        let err = parse_script("tab\nwiggle").unwrap_err();
        assert_eq!((err.line, err.col), (2, 1));
    }

    #[test]
    fn err_unknown_unit() {
        let err = parse_script("input hours+seconds").unwrap_err();
        assert_eq!((err.line, err.col), (1, 13));
    }

    #[test]
    fn err_unknown_option() {
        let err = parse_script("input hours step=5").unwrap_err();
        assert_eq!(err.command, Some("input"));
    }

    #[test]
    fn err_names_the_failing_command() {
        let err = parse_script("tab
echo \"x\"").unwrap_err();
        assert_eq!((err.command, err.line), (Some("echo"), 2));
        assert_eq!(parse_script("wiggle").unwrap_err().command, None);
    }

    #[test]
    fn every_keyword_round_trips_through_name() {
        let src = "input hours\nfocus hour\ntab\nbacktab\nblur\nescape\ntype 1\nreplace 1\n\
                   clear\nbackspace\nup\ndown\necho 1\nbounds\nshow";
        let names: Vec<_> = commands(src).iter().map(Command::name).collect();
        assert_eq!(names, KEYWORDS);
    }

    #[test]
    fn err_trailing_argument() {
        parse_script("tab 3").unwrap_err();
    }

    #[test]
    fn err_missing_echo_value() {
        parse_script("echo").unwrap_err();
    }
}
