use std::collections::HashSet;

use crate::task::Task;

/// Overwrite completion state from a selection: the tasks at the selected
/// indices become done, every other task reverts to not done. Indices past
/// the end of the list are ignored.
pub fn apply_done_selection(tasks: &mut [Task], selected: &HashSet<usize>) {
    for (idx, task) in tasks.iter_mut().enumerate() {
        task.done = selected.contains(&idx);
    }
}

/// Drop the tasks at the selected indices, keeping the remainder in their
/// original relative order.
pub fn remove_selected(tasks: Vec<Task>, selected: &HashSet<usize>) -> Vec<Task> {
    tasks
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| !selected.contains(idx))
        .map(|(_, task)| task)
        .collect()
}
