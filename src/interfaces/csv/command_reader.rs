use crate::error::{LedgerError, Result};
use std::io::Read;

/// One scripted operation: its name and ordered string arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// 1-based line number in the script.
    pub line: u64,
    pub operation: String,
    pub args: Vec<String>,
}

/// Reads operations from a CSV script.
///
/// Each row is `operation,arg1,arg2,...`. Rows may have different lengths,
/// fields are trimmed, there is no header and lines starting with `#` are
/// skipped.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads commands in script order.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader.into_records().filter_map(|result| {
            let record = match result {
                Ok(record) => record,
                Err(e) => return Some(Err(LedgerError::invalid("script", e.to_string()))),
            };
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let mut fields = record.iter().map(str::to_string);
            let operation = fields.next().filter(|op| !op.is_empty())?;
            Some(Ok(Command {
                line,
                operation,
                args: fields.collect(),
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_flexible_rows() {
        let script = "\
# demo
addClient, Pera, Peric, pera@example.com, 100
transfer,cli5,cli6,10,true

query,cli5
";
        let commands: Vec<Command> = CommandReader::new(script.as_bytes())
            .commands()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0].operation, "addClient");
        assert_eq!(
            commands[0].args,
            vec!["Pera", "Peric", "pera@example.com", "100"]
        );
        assert_eq!(commands[1].args.len(), 4);
        assert_eq!(commands[2].operation, "query");
        assert_eq!(commands[2].args, vec!["cli5"]);
        assert!(commands[2].line > commands[1].line);
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let script = "addClient,\"Ana, Maria\",Kovac,ana@example.com,0\n";
        let command = CommandReader::new(script.as_bytes())
            .commands()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(command.args[0], "Ana, Maria");
    }

    #[test]
    fn test_invalid_utf8_row_is_an_error() {
        let script: &[u8] = b"query,cli1\nquery,\xff\nquery,cli2\n";
        let results: Vec<Result<Command>> = CommandReader::new(script).commands().collect();

        assert_eq!(results.len(), 3);
        assert!(matches!(
            &results[1],
            Err(LedgerError::InvalidArgument { name: "script", .. })
        ));
        assert_eq!(results[2].as_ref().unwrap().args, vec!["cli2"]);
    }
}
