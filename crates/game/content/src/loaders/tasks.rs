//! Task table loader.
//!
//! Parses the delimited task source into rooms. Column positions are fixed:
//!
//! ```text
//! 0: room name   1: x   2: y   3: radius   4: order (optional)
//! 5: task name   6: task description
//! 7..: up to 4 groups of (choice text, result text, time cost)
//! ```
//!
//! Rows with fewer than 5 parsed fields are skipped. Quoted fields may
//! contain the delimiter; quote handling is the plain toggle rule (each
//! quote character flips the in-quote flag and is not emitted). Rows merge
//! into an existing room when the name matches and both center axes are
//! within the merge tolerance.

use std::path::Path;

use game_core::{Choice, Minutes, Position, Room, SessionConfig, Task};

use crate::loaders::{LoadResult, read_file};

const DELIMITER: char = ',';

/// Loader for the tabular task source.
pub struct TaskTableLoader;

impl TaskTableLoader {
    /// Load rooms from a delimited task table file.
    pub fn load(path: &Path) -> LoadResult<Vec<Room>> {
        let content = read_file(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse task table text into deduplicated rooms.
    pub fn parse(content: &str) -> Vec<Room> {
        let mut rooms: Vec<Room> = Vec::new();
        let mut skipped = 0usize;

        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_row(line, DELIMITER);
            if fields.len() < 5 {
                skipped += 1;
                continue;
            }

            let name = fields[0].trim();
            let (Ok(x), Ok(y), Ok(radius)) = (
                fields[1].trim().parse::<f32>(),
                fields[2].trim().parse::<f32>(),
                fields[3].trim().parse::<f32>(),
            ) else {
                skipped += 1;
                continue;
            };
            if name.is_empty() {
                skipped += 1;
                continue;
            }

            let order = fields[4].trim().parse::<u32>().ok();
            let center = Position::new(x, y);

            let room_index = match find_room(&rooms, name, center) {
                Some(index) => index,
                None => {
                    rooms.push(Room::new(name, center, radius));
                    rooms.len() - 1
                }
            };

            if let Some(task) = parse_task(&fields, order) {
                rooms[room_index].tasks.push(task);
            }
        }

        for room in &mut rooms {
            room.sort_tasks();
        }

        if skipped > 0 {
            tracing::debug!(skipped, "skipped malformed task table rows");
        }

        rooms
    }
}

/// Later rows merge into an earlier room when the name matches and the
/// center is within tolerance on both axes.
fn find_room(rooms: &[Room], name: &str, center: Position) -> Option<usize> {
    rooms.iter().position(|room| {
        room.name == name
            && (room.center.x - center.x).abs() <= SessionConfig::ROOM_MERGE_TOLERANCE
            && (room.center.y - center.y).abs() <= SessionConfig::ROOM_MERGE_TOLERANCE
    })
}

fn parse_task(fields: &[String], order: Option<u32>) -> Option<Task> {
    let name = fields.get(5).map(|f| f.trim()).unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    let description = fields.get(6).map(|f| f.trim()).unwrap_or_default();

    let mut task = Task::new(name, description, order);
    for group in 0..SessionConfig::MAX_CHOICES {
        let base = 7 + group * 3;
        let Some(text) = fields.get(base).map(|f| f.trim()) else {
            break;
        };
        if text.is_empty() {
            continue;
        }
        let result = fields.get(base + 1).map(|f| f.trim()).unwrap_or_default();
        let time = fields
            .get(base + 2)
            .and_then(|f| f.trim().parse::<u32>().ok())
            .unwrap_or(0);
        task.choices
            .push(Choice::new(text, result, Minutes(time)));
    }

    Some(task)
}

/// Splits one row on the delimiter, honoring the toggle-quote rule.
fn split_row(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quote = !in_quote;
        } else if ch == delimiter && !in_quote {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::TaskStatus;

    #[test]
    fn splits_quoted_fields_with_embedded_delimiters() {
        let fields = split_row(r#"ward,"beds, monitors",plain"#, ',');
        assert_eq!(fields, vec!["ward", "beds, monitors", "plain"]);
    }

    #[test]
    fn unterminated_quote_swallows_the_rest_of_the_row() {
        let fields = split_row(r#"a,"open,end"#, ',');
        assert_eq!(fields, vec!["a", "open,end"]);
    }

    #[test]
    fn short_rows_are_skipped() {
        let rooms = TaskTableLoader::parse("ward,10,20\nname only\n");
        assert!(rooms.is_empty());
    }

    #[test]
    fn header_rows_fail_coordinate_parsing_and_are_skipped() {
        let rooms = TaskTableLoader::parse(
            "room,x,y,radius,order,task,description\nward,10,20,30,1,check,desc,go,ok,5\n",
        );
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "ward");
    }

    #[test]
    fn rows_merge_into_room_within_tolerance_on_both_axes() {
        let input = "\
ward,100,200,30,1,first,desc a,go,ok,5
ward,104,196,30,2,second,desc b,go,ok,5
ward,100,206,30,3,third,desc c,go,ok,5
";
        let rooms = TaskTableLoader::parse(input);
        // Third row is 6 units off on y: new room despite the matching name.
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].tasks.len(), 2);
        assert_eq!(rooms[1].tasks.len(), 1);
    }

    #[test]
    fn name_mismatch_never_merges() {
        let input = "\
ward,100,200,30,1,first,desc,go,ok,5
lobby,100,200,30,1,first,desc,go,ok,5
";
        let rooms = TaskTableLoader::parse(input);
        assert_eq!(rooms.len(), 2);
    }

    #[test]
    fn tasks_sort_by_order_with_source_order_ties() {
        let input = "\
ward,100,200,30,2,late,d,go,ok,5
ward,100,200,30,1,early,d,go,ok,5
ward,100,200,30,,unordered,d,go,ok,5
";
        let rooms = TaskTableLoader::parse(input);
        let names: Vec<&str> = rooms[0].tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["early", "late", "unordered"]);
    }

    #[test]
    fn parses_up_to_four_choice_groups() {
        let input =
            "ward,1,2,30,1,check,desc,a,ra,5,b,rb,10,c,rc,0,later,,15\n";
        let rooms = TaskTableLoader::parse(input);
        let task = &rooms[0].tasks[0];
        assert_eq!(task.choices.len(), 4);
        assert_eq!(task.choices[0].time, Minutes(5));
        assert_eq!(task.choices[3].text, "later");
        assert_eq!(task.choices[3].time, Minutes(15));
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn unparseable_time_cost_reads_as_zero() {
        let input = "ward,1,2,30,1,check,desc,a,ra,soon\n";
        let rooms = TaskTableLoader::parse(input);
        assert_eq!(rooms[0].tasks[0].choices[0].time, Minutes(0));
    }

    #[test]
    fn five_field_row_creates_room_without_tasks() {
        let rooms = TaskTableLoader::parse("ward,1,2,30,\n");
        assert_eq!(rooms.len(), 1);
        assert!(rooms[0].tasks.is_empty());
    }
}
