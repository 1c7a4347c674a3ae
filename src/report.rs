use std::io::{self, Write};

use crate::types::ContainerRecord;

pub const NO_CONTAINERS: &str = "No running containers found.";

/// Write `name addr1 addr2 ...` for one container.
pub fn write_record<W: Write + ?Sized>(out: &mut W, record: &ContainerRecord) -> io::Result<()> {
    writeln!(out, "{} {}", record.name, record.addresses.join(" "))
}

pub fn write_empty<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{NO_CONTAINERS}")
}
