//! Serde support for volumes.
//!
//! Volumes serialize as internally tagged structures; collective variables
//! are referenced by `name` and `id` only. There is no `Deserialize`:
//! rebuilding a volume needs the CV objects themselves.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::volume::Volume;
use crate::cv::SharedCv;

struct CvRef<'a, P>(&'a SharedCv<P>);

impl<P> Serialize for CvRef<'_, P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("CollectiveVariable", 2)?;
        s.serialize_field("name", self.0.name())?;
        s.serialize_field("id", self.0.id())?;
        s.end()
    }
}

impl<P> Serialize for Volume<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Volume::Empty => {
                let mut s = serializer.serialize_struct("Volume", 1)?;
                s.serialize_field("kind", "empty")?;
                s.end()
            }
            Volume::Full => {
                let mut s = serializer.serialize_struct("Volume", 1)?;
                s.serialize_field("kind", "full")?;
                s.end()
            }
            Volume::Interval(leaf) => {
                let mut s = serializer.serialize_struct("Volume", 4)?;
                s.serialize_field("kind", "interval")?;
                s.serialize_field("cv", &CvRef(leaf.cv()))?;
                s.serialize_field("min", &leaf.min())?;
                s.serialize_field("max", &leaf.max())?;
                s.end()
            }
            Volume::Periodic(leaf) => {
                let mut s = serializer.serialize_struct("Volume", 7)?;
                s.serialize_field("kind", "periodic")?;
                s.serialize_field("cv", &CvRef(leaf.cv()))?;
                s.serialize_field("min", &leaf.min())?;
                s.serialize_field("max", &leaf.max())?;
                s.serialize_field(
                    "period",
                    &leaf.domain().map(|d| (d.min(), d.max())),
                )?;
                s.serialize_field("inverted", &leaf.is_inverted())?;
                s.serialize_field("config", &leaf.config())?;
                s.end()
            }
            Volume::And(ops) | Volume::Or(ops) | Volume::Xor(ops) | Volume::Sub(ops) => {
                let kind = match self {
                    Volume::And(_) => "and",
                    Volume::Or(_) => "or",
                    Volume::Xor(_) => "xor",
                    _ => "sub",
                };
                let mut s = serializer.serialize_struct("Volume", 3)?;
                s.serialize_field("kind", kind)?;
                s.serialize_field("left", ops.left())?;
                s.serialize_field("right", ops.right())?;
                s.end()
            }
            Volume::Not(neg) => {
                let mut s = serializer.serialize_struct("Volume", 2)?;
                s.serialize_field("kind", "not")?;
                s.serialize_field("inner", neg.inner())?;
                s.end()
            }
        }
    }
}
