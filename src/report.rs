//! Result reporting.

use std::fmt;

/// One computed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub a: i32,
    pub b: i32,
    pub c: i32,
}

/// Inputs and device output, paired in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    rows: Vec<Row>,
}

impl Report {
    /// Pair the arrays element by element. Extra elements of a longer array
    /// are ignored.
    pub fn new(a: &[i32], b: &[i32], c: &[i32]) -> Self {
        let rows = a
            .iter()
            .zip(b)
            .zip(c)
            .map(|((&a, &b), &c)| Row { a, b, c })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The output array C.
    pub fn output(&self) -> Vec<i32> {
        self.rows.iter().map(|r| r.c).collect()
    }

    /// True when every row satisfies `c == a + b` (wrapping).
    pub fn is_correct(&self) -> bool {
        self.rows.iter().all(|r| r.a.wrapping_add(r.b) == r.c)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Result of vec_add kernel (computed A + B = [C]):")?;
        for row in &self.rows {
            writeln!(f, "{} + {} = {}", row.a, row.b, row.c)?;
        }
        Ok(())
    }
}
