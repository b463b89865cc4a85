use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use hourglass_input::prelude::*;
use log::{debug, info};

use crate::render::{format_duration, render_input};
use crate::script::{Command, ScriptError, Statement};

/// Drives one [`DurationInput`] from script statements and writes what the
/// owner would observe: every reported change and every `show`.
///
/// When the script supplies `value=`, the session plays a controlled owner
/// and echoes each reported change straight back.
pub struct Session<W: Write> {
    input: Option<DurationInput>,
    outbox: Rc<RefCell<Vec<u64>>>,
    controlled: bool,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(out: W) -> Self {
        Self { input: None, outbox: Rc::new(RefCell::new(Vec::new())), controlled: false, out }
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    pub fn run(&mut self, statements: &[Statement]) -> anyhow::Result<()> {
        for stmt in statements {
            self.execute(stmt)?;
        }
        Ok(())
    }

    pub fn execute(&mut self, stmt: &Statement) -> anyhow::Result<()> {
        if let Command::Input { units, props } = &stmt.command {
            self.start(*units, *props)?;
            return Ok(());
        }

        let Some(input) = self.input.as_mut() else {
            let err = ScriptError::new("no input yet, start the script with `input`", stmt.line, 1)
                .in_command(stmt.command.name());
            return Err(err.into());
        };

        let event = match &stmt.command {
            Command::Input { .. } => return Ok(()),
            Command::Focus(unit) => InputEvent::Click { unit: *unit },
            Command::Tab { reverse } => InputEvent::KeyPress { key: Key::Tab, shift: *reverse },
            Command::Blur => InputEvent::ClickOutside,
            Command::Escape => InputEvent::key(Key::Escape),
            Command::Type(text) => InputEvent::text(text.clone()),
            Command::Replace(text) => InputEvent::replace(text.clone()),
            Command::Clear => InputEvent::replace(""),
            Command::Backspace => InputEvent::key(Key::Backspace),
            Command::Step { up: true } => InputEvent::key(Key::ArrowUp),
            Command::Step { up: false } => InputEvent::key(Key::ArrowDown),
            Command::Echo(value) => {
                input.set_value(*value);
                return self.flush();
            }
            Command::Bounds(bounds) => {
                input.set_bounds(*bounds);
                return self.flush();
            }
            Command::Show => {
                writeln!(self.out, "{}", render_input(input))?;
                return Ok(());
            }
        };

        if !input.on_event(&event).is_consumed() {
            debug!("line {}: {:?} ignored", stmt.line, event);
        }
        self.flush()
    }

    fn start(&mut self, units: UnitSet, props: DurationProps) -> anyhow::Result<()> {
        info!("new input: units={} bounds={:?}", units, props.bounds());
        self.outbox.borrow_mut().clear();
        self.controlled = props.value.is_some();
        let sink = self.outbox.clone();
        self.input = Some(DurationInput::new(props, units, move |v| sink.borrow_mut().push(v)));
        self.flush()
    }

    /// Prints pending changes. A controlled owner echoes each one back, which
    /// may not produce further changes since echoes never emit.
    fn flush(&mut self) -> anyhow::Result<()> {
        let pending: Vec<u64> = self.outbox.borrow_mut().drain(..).collect();
        for value in pending {
            writeln!(self.out, "change {}s ({})", value, format_duration(value))?;
            if self.controlled {
                if let Some(input) = self.input.as_mut() {
                    input.set_value(value);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    fn run(src: &str) -> String {
        let mut session = Session::new(Vec::new());
        session.run(&parse_script(src).unwrap()).unwrap();
        String::from_utf8(session.into_writer()).unwrap()
    }

    #[test]
    fn uncontrolled_reports_initial_value() {
        assert_eq!(run("input hours+minutes default=5400"), "change 5400s (1h 30m)\n");
    }

    #[test]
    fn typing_minutes_reports_recomposed_value() {
        let out = run("input hours+minutes value=3600\nfocus minute\nreplace 20\nshow");
        assert_eq!(
            out,
            "change 4800s (1h 20m)\nhrs [1] 0.. | mins >[20]< 0..=59 | 4800s (1h 20m)\n",
        );
    }

    #[test]
    fn hour_edit_over_max_is_clamped() {
        let out = run("input hours+minutes max=5400 default=2700\nfocus hours\nreplace 1\nshow");
        assert_eq!(
            out,
            "change 2700s (45m)\nchange 5400s (1h 30m)\nhrs >[1]< 0..=1 | mins [30] 0..=30 | 5400s (1h 30m)\n",
        );
    }

    #[test]
    fn echo_and_bounds_resync_without_reporting() {
        let out = run("input minutes value=0\necho 600\nbounds max=300\nshow");
        assert_eq!(out, "mins [10] 0..=5 | 600s (10m)\n");
    }

    #[test]
    fn command_before_input_is_an_error() {
        let mut session = Session::new(Vec::new());
        let err = session.run(&parse_script("\ntab").unwrap()).unwrap_err();
        let err = err.downcast::<ScriptError>().unwrap();
        assert_eq!((err.line, err.col), (2, 1));
        assert_eq!(err.command, Some("tab"));
    }

    #[test]
    fn ignored_events_print_nothing() {
        assert_eq!(run("input hours value=0\ntype 4"), "");
    }

    #[test]
    fn bundled_scripts_run_clean() {
        for src in [include_str!("../scripts/clamp.hg"), include_str!("../scripts/controlled.hg")] {
            assert!(!run(src).is_empty());
        }
    }
}
