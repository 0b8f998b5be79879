//! ASCII tree rendering for estimations.

use pert_core::aggregate::{milestone_total, project_total};
use pert_core::management::{is_management_task, tasks_with_management};
use pert_core::pert::format_hours;
use pert_core::{Milestone, Project, Task};

const ENABLED: char = '●';
const DISABLED: char = '✗';
const MANAGEMENT: char = '◆';

fn task_symbol(task: &Task) -> char {
    if !task.is_enabled {
        DISABLED
    } else if is_management_task(task) {
        MANAGEMENT
    } else {
        ENABLED
    }
}

fn milestone_symbol(milestone: &Milestone) -> char {
    if milestone.is_enabled {
        ENABLED
    } else {
        DISABLED
    }
}

/// Render a project as an ASCII tree with expected hours.
///
/// Example output:
/// ```text
/// Acme - Web Shop
/// ├── ● A Discovery  23.00h
/// │   ├── ● A1 Cart  20.00h
/// │   ├── ✗ A2 Wishlist  5.00h
/// │   └── ◆ A-mgmt Project Management (10%, 15%, 20%)  3.00h
/// └── ✗ B Later  0.00h
///     └── ◆ B-mgmt Project Management (10%, 15%, 20%)  0.00h
/// Grand total: 23.00h
/// ```
pub fn render_project(project: &Project) -> String {
    let mut output = String::new();

    if project.client_name.is_empty() {
        output.push_str(&project.project_name);
    } else {
        output.push_str(&format!(
            "{} - {}",
            project.client_name, project.project_name
        ));
    }
    output.push('\n');

    for (i, milestone) in project.milestones.iter().enumerate() {
        let is_last = i == project.milestones.len() - 1;
        render_milestone(&mut output, milestone, is_last);
    }

    output.push_str(&format!(
        "Grand total: {}h\n",
        format_hours(project_total(project))
    ));
    output
}

fn render_milestone(output: &mut String, milestone: &Milestone, is_last: bool) {
    let branch = if is_last { "└── " } else { "├── " };
    output.push_str(&format!(
        "{}{} {} {}  {}h\n",
        branch,
        milestone_symbol(milestone),
        milestone.id,
        milestone.name,
        format_hours(milestone_total(milestone))
    ));

    let prefix = if is_last { "    " } else { "│   " };
    let tasks = tasks_with_management(milestone);
    for (i, task) in tasks.iter().enumerate() {
        let branch = if i == tasks.len() - 1 {
            "└── "
        } else {
            "├── "
        };
        output.push_str(&format!(
            "{}{}{} {} {}  {}h\n",
            prefix,
            branch,
            task_symbol(task),
            task.id,
            task.name,
            format_hours(task.expected())
        ));
    }
}
