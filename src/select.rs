use std::io::{BufRead, Write};

use crate::error::{LifError, Result};

/// Prompt for one of `ids` by index until a valid choice is entered.
pub fn select_layout<R: BufRead, W: Write>(ids: &[String], mut input: R, mut output: W) -> Result<String> {
    if ids.is_empty() {
        return Err(LifError::NoLayouts);
    }

    let io_err = LifError::Terminal;

    writeln!(output, "Available layouts:").map_err(io_err)?;
    for (idx, id) in ids.iter().enumerate() {
        writeln!(output, "  {idx}: {id}").map_err(io_err)?;
    }

    let mut line = String::new();
    loop {
        write!(output, "Select a layout [0-{}]: ", ids.len() - 1).map_err(io_err)?;
        output.flush().map_err(io_err)?;

        line.clear();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(LifError::SelectionAborted);
        }

        match line.trim().parse::<usize>() {
            Ok(idx) if idx < ids.len() => return Ok(ids[idx].clone()),
            Ok(idx) => {
                writeln!(output, "{idx} is out of range").map_err(io_err)?;
            }
            Err(_) => {
                writeln!(output, "please enter a number").map_err(io_err)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ids() -> Vec<String> {
        vec!["hall".to_string(), "yard".to_string()]
    }

    #[test]
    fn returns_chosen_id() {
        let mut out = Vec::new();
        let chosen = select_layout(&ids(), Cursor::new("1\n"), &mut out).unwrap();
        assert_eq!(chosen, "yard");
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("0: hall"));
        assert!(printed.contains("1: yard"));
    }

    #[test]
    fn reprompts_until_valid() {
        let mut out = Vec::new();
        let chosen = select_layout(&ids(), Cursor::new("abc\n-1\n7\n\n0\n"), &mut out).unwrap();
        assert_eq!(chosen, "hall");
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("Select a layout").count(), 5);
        assert!(printed.contains("7 is out of range"));
    }

    #[test]
    fn closed_input_aborts() {
        let err = select_layout(&ids(), Cursor::new("x\n"), std::io::sink()).unwrap_err();
        assert!(matches!(err, LifError::SelectionAborted));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn output_failure_is_a_terminal_error() {
        let err = select_layout(&ids(), Cursor::new("0\n"), BrokenPipe).unwrap_err();
        assert!(matches!(err, LifError::Terminal(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));
        assert!(err.to_string().starts_with("terminal I/O failed"));
    }

    #[test]
    fn empty_list_is_an_error() {
        let err = select_layout(&[], Cursor::new("0\n"), std::io::sink()).unwrap_err();
        assert!(matches!(err, LifError::NoLayouts));
    }
}
