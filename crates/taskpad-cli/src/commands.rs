use std::collections::HashSet;

use anyhow::{bail, Context, Result};

use taskpad_core::store::{StoreError, TaskStore};
use taskpad_core::task::Task;
use taskpad_core::task_ops;

use crate::select::{multi_select, SelectItem};

/// Load the task list, treating a malformed file as empty. The messaging
/// lives here rather than in the store: corruption is reported once on
/// stderr and the command proceeds with no tasks, leaving the file alone
/// until the next save. I/O failures still abort the command.
fn load_or_empty(store: &TaskStore) -> Result<Vec<Task>> {
    match store.load() {
        Ok(tasks) => Ok(tasks),
        Err(StoreError::Parse(err)) => {
            eprintln!(
                "Warning: ignoring unreadable task file {}: {err}",
                store.path().display()
            );
            Ok(Vec::new())
        }
        Err(err) => Err(err).context("failed to read task file"),
    }
}

fn save(store: &TaskStore, tasks: &[Task]) -> Result<()> {
    store.save(tasks).context("failed to save task file")
}

pub fn cmd_add(store: &TaskStore, title: &str) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        bail!("task title must not be empty");
    }
    let mut tasks = load_or_empty(store)?;
    tasks.push(Task::new(title));
    save(store, &tasks)?;
    println!("Added task: {title}");
    Ok(())
}

pub fn cmd_list(store: &TaskStore) -> Result<()> {
    let tasks = load_or_empty(store)?;
    if tasks.is_empty() {
        println!("No tasks yet.");
        return Ok(());
    }
    print!("{}", taskpad_render::render_table(&tasks));
    Ok(())
}

pub fn cmd_done(store: &TaskStore) -> Result<()> {
    let mut tasks = load_or_empty(store)?;
    if tasks.is_empty() {
        println!("No tasks yet.");
        return Ok(());
    }

    let items: Vec<SelectItem> = tasks
        .iter()
        .map(|task| SelectItem {
            label: format!("{} {}", if task.done { '✓' } else { '✗' }, task.title),
            checked: task.done,
        })
        .collect();
    let Some(selected) = multi_select("Select tasks to mark as done", &items)? else {
        println!("Aborted, nothing changed.");
        return Ok(());
    };

    // Full overwrite: the selection is the new completion state.
    let selected: HashSet<usize> = selected.into_iter().collect();
    task_ops::apply_done_selection(&mut tasks, &selected);
    save(store, &tasks)?;
    println!("Tasks updated.");
    Ok(())
}

pub fn cmd_delete(store: &TaskStore) -> Result<()> {
    let tasks = load_or_empty(store)?;
    if tasks.is_empty() {
        println!("No tasks yet.");
        return Ok(());
    }

    let items: Vec<SelectItem> = tasks
        .iter()
        .map(|task| SelectItem {
            label: task.title.clone(),
            checked: false,
        })
        .collect();
    let Some(selected) = multi_select("Select tasks to delete", &items)? else {
        println!("Aborted, nothing changed.");
        return Ok(());
    };

    let selected: HashSet<usize> = selected.into_iter().collect();
    let before = tasks.len();
    let remaining = task_ops::remove_selected(tasks, &selected);
    let removed = before - remaining.len();
    save(store, &remaining)?;
    let noun = if removed == 1 { "task" } else { "tasks" };
    println!("Deleted {removed} {noun}.");
    Ok(())
}
