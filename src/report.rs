/*!
Error printer used as the return type of `main`.

Snafu errors only show their own message through `Display`, so `Report`
walks the `source()` chain and prints every cause underneath.
*/

use std::error::Error as StdError;

pub struct Report(Box<dyn StdError>);

impl Report {
    /// Iterates over the wrapped error followed by all of its causes.
    pub fn chain(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        std::iter::successors(Some(&*self.0 as &(dyn StdError + 'static)), |&e| e.source())
    }
}

impl std::fmt::Debug for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut chain = self.chain();

        if let Some(top) = chain.next() {
            writeln!(f, "{}", top)?;
        }

        let mut causes = chain.enumerate().peekable();
        if causes.peek().is_some() {
            writeln!(f, "\nCaused by:")?;
            for (i, e) in causes {
                writeln!(f, "  {}: {}", i, e)?;
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<E: Into<Box<dyn StdError>>> From<E> for Report {
    fn from(e: E) -> Self {
        Report(e.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    use super::Report;

    #[derive(Debug, Snafu)]
    enum Error {
        #[snafu(display("Failed to load problem"))]
        Load { source: std::num::ParseIntError },
    }

    fn load(s: &str) -> Result<u32, Error> {
        s.parse().context(Load)
    }

    #[test]
    fn debug_lists_causes() {
        let report = Report::from(load("x").unwrap_err());
        let printed = format!("{:?}", report);

        assert_eq!(report.chain().count(), 2);
        assert!(printed.starts_with("Failed to load problem\n"));
        assert!(printed.contains("Caused by:"));
        assert!(printed.contains("  0: invalid digit found in string"));
    }

    #[test]
    fn debug_without_causes() {
        let report = Report::from("no such solver");
        let printed = format!("{:?}", report);

        assert_eq!(report.chain().count(), 1);
        assert_eq!(printed, "no such solver\n");
        assert_eq!(report.to_string(), "no such solver");
    }
}
