//! SQL text helpers: string quoting and batched multi-row INSERT framing.

use std::io::Write;

use waypost_common::Result;

/// Quote a string field for embedding in a VALUES tuple, doubling any
/// embedded single quotes. An empty string renders as the unquoted `null`
/// marker, matching how the upstream dataset stores absent names.
pub fn quote_nullable(value: &str) -> String {
    if value.is_empty() {
        return "null".to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            quoted.push('\'');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

/// Frames pre-rendered VALUES tuples into multi-row INSERT statements of at
/// most `batch_size` rows each.
///
/// Rows are written through to the sink as they arrive, in input order; no
/// row text is retained after the write. The final (possibly partial)
/// statement is terminated by [`BatchWriter::finish`].
pub struct BatchWriter<W: Write> {
    out: W,
    table: String,
    batch_size: usize,
    in_batch: usize,
    total: u64,
}

impl<W: Write> BatchWriter<W> {
    pub fn new(out: W, table: &str, batch_size: usize) -> Self {
        Self {
            out,
            table: table.to_string(),
            batch_size: batch_size.max(1),
            in_batch: 0,
            total: 0,
        }
    }

    /// Append one VALUES tuple, opening a new statement when the previous
    /// batch is full.
    pub fn push(&mut self, row: &str) -> Result<()> {
        if self.in_batch == self.batch_size {
            self.out.write_all(b";\n")?;
            self.in_batch = 0;
        }
        self.in_batch += 1;
        if self.in_batch == 1 {
            write!(self.out, "\nINSERT INTO {} VALUES ", self.table)?;
        } else {
            self.out.write_all(b",")?;
        }
        self.out.write_all(b"\n")?;
        self.out.write_all(row.as_bytes())?;
        self.total += 1;
        Ok(())
    }

    /// Terminate the final statement. Returns the total row count.
    pub fn finish(mut self) -> Result<u64> {
        if self.total > 0 {
            self.out.write_all(b";\n")?;
        }
        Ok(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_batches(batch_size: usize, rows: usize) -> String {
        let mut buf = Vec::new();
        let mut writer = BatchWriter::new(&mut buf, "t", batch_size);
        for i in 0..rows {
            writer.push(&format!("({i})")).unwrap();
        }
        writer.finish().unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_exact_batch_is_one_statement() {
        let out = run_batches(25, 25);
        assert_eq!(out.matches("INSERT INTO t VALUES").count(), 1);
        assert_eq!(out.matches(';').count(), 1);
        assert_eq!(out.matches('(').count(), 25);
        assert!(out.ends_with(";\n"));
    }

    #[test]
    fn test_overflow_starts_second_statement() {
        let out = run_batches(25, 26);
        assert_eq!(out.matches("INSERT INTO t VALUES").count(), 2);
        assert_eq!(out.matches(';').count(), 2);
    }

    #[test]
    fn test_partial_batch_is_terminated() {
        let out = run_batches(25, 3);
        assert_eq!(out.matches("INSERT INTO t VALUES").count(), 1);
        assert!(out.ends_with(";\n"));
    }

    #[test]
    fn test_no_rows_no_statement() {
        let out = run_batches(25, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_rows_keep_input_order() {
        let out = run_batches(2, 5);
        let positions: Vec<usize> = (0..5)
            .map(|i| out.find(&format!("({i})")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_finish_reports_total() {
        let mut buf = Vec::new();
        let mut writer = BatchWriter::new(&mut buf, "t", 10);
        for i in 0..7 {
            writer.push(&format!("({i})")).unwrap();
        }
        assert_eq!(writer.finish().unwrap(), 7);
    }

    #[test]
    fn test_quote_nullable() {
        assert_eq!(quote_nullable("Elbchaussee"), "'Elbchaussee'");
        assert_eq!(quote_nullable("s'Gravenweg"), "'s''Gravenweg'");
        assert_eq!(quote_nullable(""), "null");
    }
}
