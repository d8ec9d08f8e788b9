//! Plain-text rendering of items and highlights.
//!
//! Presentation only: nothing in the set algebra depends on it.
//!
//! ```text
//! ==Document name==
//! first snippet | second snippet
//! [xywh=10,20,30,40]
//! ```

use crate::{Highlight, Item, ItemSet};
use std::fmt;

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Highlight::Span(span) => {
                for (i, text) in span.texts().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    f.write_str(&text.replace('\n', " "))?;
                }
                Ok(())
            }
            Highlight::Region(_) => write!(f, "[{}]", self.fragment()),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=={}==", self.name())?;
        for highlight in self.highlights() {
            writeln!(f, "{highlight}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items: Vec<&Item> = self.items().collect();
        items.sort_by(|a, b| a.id().cmp(b.id()));
        for item in items {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}
