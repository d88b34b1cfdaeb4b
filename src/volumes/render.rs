//! Canonical string rendering of volumes.
//!
//! | Volume        | Rendering                                   |
//! |---------------|---------------------------------------------|
//! | `Empty`       | `empty`                                     |
//! | `Full`        | `all`                                       |
//! | `Interval`    | `{x|Id(x) in [min, max]}`                   |
//! | `Periodic`    | `{x|(Id(x) - s) % l + s in [min, max]}`     |
//! | `And`/`Or`/.. | `(left <op> right)`                         |
//! | `Not`         | `not inner`                                 |

use std::fmt::{self, Display};

use super::volume::Volume;

/// Pending output of the iterative renderer.
enum Piece<'a, P> {
    Node(&'a Volume<P>),
    Text(&'static str),
}

impl<P> Display for Volume<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces = vec![Piece::Node(self)];
        while let Some(piece) = pieces.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node) => node,
            };
            match node {
                Volume::Empty => f.write_str("empty")?,
                Volume::Full => f.write_str("all")?,
                Volume::Interval(leaf) => Display::fmt(leaf, f)?,
                Volume::Periodic(leaf) => Display::fmt(leaf, f)?,
                Volume::And(ops) | Volume::Or(ops) | Volume::Xor(ops) | Volume::Sub(ops) => {
                    let op = node.kind().operator().unwrap_or_default();
                    f.write_str("(")?;
                    pieces.push(Piece::Text(")"));
                    pieces.push(Piece::Node(ops.right()));
                    pieces.push(Piece::Text(" "));
                    pieces.push(Piece::Text(op));
                    pieces.push(Piece::Text(" "));
                    pieces.push(Piece::Node(ops.left()));
                }
                Volume::Not(neg) => {
                    f.write_str("not ")?;
                    pieces.push(Piece::Node(neg.inner()));
                }
            }
        }
        Ok(())
    }
}

impl<P> Volume<P> {
    /// Returns the canonical string form of this volume.
    pub fn render(&self) -> String {
        self.to_string()
    }
}
