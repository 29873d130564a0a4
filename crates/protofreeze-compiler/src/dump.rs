//! Human-readable dump of a flattened instance.
//!
//! Shows the string pool and every bucket exactly as the data emitter will
//! lay them out:
//!
//! ```text
//! [strings]
//! S0 @0 "Alice"
//! S1 @5 "Bob"
//!
//! [bucket demo_Person]
//! V0 = msg#2
//! V1 = msg#0
//! A0 = V1..V3 (2) arr#0
//! ```

use std::fmt::Write as _;

use protofreeze_core::Colors;

use crate::emit::{Bucket, CLiteralFormatter, Collected, LiteralFormatter, Slot};

/// Generate a dump of the collected pool and buckets.
pub fn dump(collected: &Collected<'_>, colors: Colors) -> String {
    let mut out = String::new();
    dump_strings(&mut out, collected, colors);
    for bucket in collected.buckets.iter() {
        dump_bucket(&mut out, bucket, colors);
    }
    out
}

fn dump_strings(out: &mut String, collected: &Collected<'_>, c: Colors) {
    let pool = &collected.strings;
    writeln!(out, "{}[strings]{}", c.blue, c.reset).unwrap();
    let w = width_for_count(pool.len());
    for entry in pool.entries() {
        let text = String::from_utf8_lossy(&entry.content);
        writeln!(
            out,
            "S{:0w$} {}@{}{} {}{text:?}{}",
            entry.index, c.dim, entry.offset, c.reset, c.green, c.reset
        )
        .unwrap();
    }
    out.push('\n');
}

fn dump_bucket(out: &mut String, bucket: &Bucket, c: Colors) {
    writeln!(out, "{}[bucket {}]{}", c.blue, bucket.name(), c.reset).unwrap();

    let vw = width_for_count(bucket.values().len());
    for (i, slot) in bucket.values().iter().enumerate() {
        let value = match slot {
            Slot::Message(h) => format!("{}msg#{}{}", c.dim, h.index(), c.reset),
            Slot::Scalar(v) => CLiteralFormatter.format(*v),
        };
        writeln!(out, "V{i:0vw$} = {value}").unwrap();
    }

    let aw = width_for_count(bucket.arrays().len());
    for (i, window) in bucket.arrays().iter().enumerate() {
        writeln!(
            out,
            "A{i:0aw$} = V{}..V{} ({}) {}arr#{}{}",
            window.offset,
            window.offset + window.len,
            window.len,
            c.dim,
            window.handle.index(),
            c.reset
        )
        .unwrap();
    }
    out.push('\n');
}

/// Digits needed to print indices below `count`.
fn width_for_count(count: usize) -> usize {
    count.saturating_sub(1).max(1).ilog10() as usize + 1
}
