//! Drag and keyboard reordering.
//!
//! The UI layer translates raw input into [`ReorderInput`] commands; the
//! controller turns them into [`TaskList::reorder`] calls. Only the drag
//! source is kept between commands.

use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::error::ValidationError;
use crate::task::TaskList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderInput {
    /// Pointer pressed on the task at this position.
    DragStart(usize),
    /// Dragged task released over the task at this position.
    DropOn(usize),
    /// Drag finished, with or without a drop.
    DragEnd,
    /// Arrow key pressed while the task at `focused` has focus.
    Key { focused: usize, direction: Direction },
}

/// Result of one dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderOutcome {
    /// Whether the list order changed (and was persisted).
    pub moved: bool,
    /// Position that should hold focus afterwards, for keyboard input.
    pub focus: Option<usize>,
}

impl ReorderOutcome {
    fn unchanged(focus: Option<usize>) -> Self {
        Self { moved: false, focus }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReorderController {
    drag_source: Option<usize>,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position captured by the last `DragStart`, if a drag is armed.
    pub fn drag_source(&self) -> Option<usize> {
        self.drag_source
    }

    pub fn dispatch(
        &mut self,
        list: &mut TaskList,
        ctx: &mut Context<'_>,
        input: ReorderInput,
    ) -> Result<ReorderOutcome, ValidationError> {
        match input {
            ReorderInput::DragStart(position) => {
                ValidationError::check_position("task list", position, list.len())?;
                self.drag_source = Some(position);
                Ok(ReorderOutcome::unchanged(None))
            }
            ReorderInput::DropOn(target) => {
                let Some(source) = self.drag_source.take() else {
                    return Ok(ReorderOutcome::unchanged(None));
                };
                let moved = list.reorder(ctx, source, target)?;
                Ok(ReorderOutcome { moved, focus: None })
            }
            ReorderInput::DragEnd => {
                self.drag_source = None;
                Ok(ReorderOutcome::unchanged(None))
            }
            ReorderInput::Key { focused, direction } => {
                ValidationError::check_position("task list", focused, list.len())?;
                let neighbor = match direction {
                    Direction::Up => focused.checked_sub(1),
                    Direction::Down => Some(focused + 1).filter(|&n| n < list.len()),
                };
                match neighbor {
                    Some(to) => {
                        let moved = list.reorder(ctx, focused, to)?;
                        Ok(ReorderOutcome {
                            moved,
                            focus: Some(to),
                        })
                    }
                    None => Ok(ReorderOutcome::unchanged(Some(focused))),
                }
            }
        }
    }
}
