//! Copies a [`CellSurface`] onto the real terminal

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
};
use std::io::{self, Write};
use ylterm_terminal::CellSurface;

/// Write the rows that changed since the last call. After a viewport move
/// every visible row is rewritten. Ink-background cells are drawn reversed.
pub fn flush<W: Write>(out: &mut W, surface: &mut CellSurface) -> io::Result<()> {
    let viewport_changed = surface.take_viewport_changed();
    let dirty = surface.take_dirty();
    let visible = surface.visible_rows();

    let rows: Vec<usize> = if viewport_changed {
        visible.clone().collect()
    } else {
        dirty
            .into_iter()
            .filter(|row| visible.contains(row))
            .collect()
    };

    if rows.is_empty() {
        return Ok(());
    }

    for row in rows {
        let screen_row = u16::try_from(row - visible.start).unwrap_or(u16::MAX);
        queue!(out, MoveTo(0, screen_row))?;
        write_row(out, surface, row)?;
    }

    out.flush()
}

fn write_row<W: Write>(out: &mut W, surface: &CellSurface, row: usize) -> io::Result<()> {
    let mut run = String::new();
    let mut reversed = false;

    for x in 0..surface.columns() {
        let cell = surface.cell_at(x, row).copied().unwrap_or_default();
        if cell.is_block() != reversed {
            write_run(out, &mut run, reversed)?;
            reversed = cell.is_block();
        }
        run.push(cell.c);
    }

    write_run(out, &mut run, reversed)
}

fn write_run<W: Write>(out: &mut W, run: &mut String, reversed: bool) -> io::Result<()> {
    if run.is_empty() {
        return Ok(());
    }

    if reversed {
        queue!(
            out,
            SetAttribute(Attribute::Reverse),
            Print(run.as_str()),
            SetAttribute(Attribute::NoReverse)
        )?;
    } else {
        queue!(out, Print(run.as_str()))?;
    }

    run.clear();
    Ok(())
}
