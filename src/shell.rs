//! Interactive menu shell
//!
//! Reads one command at a time from any `BufRead` and writes replies to any
//! `Write`, so the loop runs the same against a terminal or a test buffer.
//! The shell borrows the store; closing it stays with the owner.

use std::io::{BufRead, Write};
use crate::graph::RelationGraph;
use crate::record::{Record, parse_related_ids};
use crate::render::GraphFormat;
use crate::storage::SqliteStore;
use crate::{Error, Result};

const MENU: &str = "\nChoose an action:\n\
1. Insert record\n\
2. Search by keyword\n\
3. Delete record\n\
4. List all records\n\
5. Visualize relations\n\
6. Exit";

/// A single menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Insert,
    Search,
    Delete,
    ListAll,
    Visualize,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Insert),
            "2" => Some(MenuChoice::Search),
            "3" => Some(MenuChoice::Delete),
            "4" => Some(MenuChoice::ListAll),
            "5" => Some(MenuChoice::Visualize),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// How the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    /// The operator chose Exit
    Requested,
    /// Input ran out
    EndOfInput,
}

pub struct Shell<'a, R, W> {
    store: &'a SqliteStore,
    input: R,
    output: W,
    graph_format: GraphFormat,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a SqliteStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            graph_format: GraphFormat::Text,
        }
    }

    /// Choose how Visualize renders the graph
    pub fn with_graph_format(mut self, format: GraphFormat) -> Self {
        self.graph_format = format;
        self
    }

    /// Run until Exit or end of input.
    ///
    /// Duplicate ids and invalid records are reported and the loop goes on;
    /// storage and IO failures end it with an error.
    pub fn run(&mut self) -> Result<ShellExit> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("> ")? else {
                return Ok(ShellExit::EndOfInput);
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Invalid input, please try again.")?;
                continue;
            };
            tracing::debug!(?choice, "Menu command");

            let finished = match choice {
                MenuChoice::Insert => self.insert()?,
                MenuChoice::Search => self.search()?,
                MenuChoice::Delete => self.delete()?,
                MenuChoice::ListAll => {
                    self.list_all()?;
                    true
                }
                MenuChoice::Visualize => {
                    self.visualize()?;
                    true
                }
                MenuChoice::Exit => {
                    writeln!(self.output, "Exiting.")?;
                    return Ok(ShellExit::Requested);
                }
            };

            if !finished {
                return Ok(ShellExit::EndOfInput);
            }
        }
    }

    /// Write `label`, then read one line without its line ending.
    /// `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }

    fn insert(&mut self) -> Result<bool> {
        let Some(id) = self.prompt("Enter ID: ")? else { return Ok(false) };
        let Some(content) = self.prompt("Enter content: ")? else { return Ok(false) };
        let Some(related) = self.prompt("Enter related IDs, comma separated: ")? else {
            return Ok(false);
        };

        let record = Record::new(id.trim(), content, parse_related_ids(&related));
        match self.store.insert_record(&record) {
            Ok(()) => writeln!(self.output, "Record inserted.")?,
            Err(Error::DuplicateId(id)) => {
                writeln!(self.output, "Error: a record with ID {} already exists.", id)?
            }
            Err(Error::InvalidRecord(reason)) => writeln!(self.output, "Error: {}.", reason)?,
            Err(e) => return Err(e),
        }
        Ok(true)
    }

    fn search(&mut self) -> Result<bool> {
        let Some(keyword) = self.prompt("Enter keyword: ")? else { return Ok(false) };

        let results = self.store.search_by_keyword(&keyword)?;
        if results.is_empty() {
            writeln!(self.output, "No records contain that keyword.")?;
        } else {
            writeln!(self.output, "Records containing the keyword:")?;
            for summary in results {
                writeln!(self.output, "{}", summary)?;
            }
        }
        Ok(true)
    }

    fn delete(&mut self) -> Result<bool> {
        let Some(id) = self.prompt("Enter ID to delete: ")? else { return Ok(false) };
        let id = id.trim();

        if self.store.delete_record(id)? == 0 {
            writeln!(self.output, "No record with ID {} was found.", id)?;
        } else {
            writeln!(self.output, "Record {} deleted.", id)?;
        }
        Ok(true)
    }

    fn list_all(&mut self) -> Result<()> {
        let records = self.store.list_all()?;
        if records.is_empty() {
            writeln!(self.output, "The store is empty.")?;
        } else {
            writeln!(self.output, "All records:")?;
            for summary in records {
                writeln!(self.output, "{}", summary)?;
            }
        }
        Ok(())
    }

    fn visualize(&mut self) -> Result<()> {
        let graph = RelationGraph::from_relations(self.store.list_all_with_relations()?);
        if graph.is_empty() {
            writeln!(self.output, "The store is empty.")?;
            return Ok(());
        }

        let rendered = self.graph_format.render(&graph)?;
        write!(self.output, "{}", rendered)?;
        if !rendered.ends_with('\n') {
            writeln!(self.output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(store: &SqliteStore, script: &str) -> (ShellExit, String) {
        let mut output = Vec::new();
        let exit = Shell::new(store, script.as_bytes(), &mut output).run().unwrap();
        (exit, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::Insert));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("insert"), None);
    }

    #[test]
    fn test_insert_then_list() {
        let store = SqliteStore::open_in_memory().unwrap();
        let (exit, out) = run_script(&store, "1\nr1\nhello world\nr2, r3\n4\n6\n");

        assert_eq!(exit, ShellExit::Requested);
        assert!(out.contains("Record inserted."));
        assert!(out.contains("ID: r1, Content: hello world"));
        assert!(out.contains("Exiting."));

        let record = store.get_record("r1").unwrap().unwrap();
        assert_eq!(record.related_ids, vec!["r2", "r3"]);
    }

    #[test]
    fn test_blank_relations_mean_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        run_script(&store, "1\nr1\ntext\n\n6\n");

        let record = store.get_record("r1").unwrap().unwrap();
        assert!(record.related_ids.is_empty());
    }

    #[test]
    fn test_duplicate_insert_is_reported() {
        let store = SqliteStore::open_in_memory().unwrap();
        let (_, out) = run_script(&store, "1\na\none\n\n1\na\ntwo\n\n6\n");

        assert!(out.contains("Error: a record with ID a already exists."));
        assert_eq!(store.get_record("a").unwrap().unwrap().content, "one");
    }

    #[test]
    fn test_search_and_delete_messages() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_record(&Record::new("a", "apple pie", vec![])).unwrap();

        let (_, out) = run_script(&store, "2\npie\n2\nkiwi\n3\nzzz\n3\na\n4\n6\n");

        assert!(out.contains("Records containing the keyword:\nID: a, Content: apple pie"));
        assert!(out.contains("No records contain that keyword."));
        assert!(out.contains("No record with ID zzz was found."));
        assert!(out.contains("Record a deleted."));
        assert!(out.contains("The store is empty."));
    }

    #[test]
    fn test_visualize() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .insert_record(&Record::new("A", "", vec!["B".to_string(), "C".to_string()]))
            .unwrap();
        store.insert_record(&Record::new("B", "", vec![])).unwrap();

        let (_, out) = run_script(&store, "5\n6\n");
        assert!(out.contains("A -> B, C?\nB\nC?\n"));
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let store = SqliteStore::open_in_memory().unwrap();
        let (exit, out) = run_script(&store, "9\nhello\n6\n");

        assert_eq!(exit, ShellExit::Requested);
        assert_eq!(out.matches("Invalid input, please try again.").count(), 2);
    }

    #[test]
    fn test_end_of_input_stops_loop() {
        let store = SqliteStore::open_in_memory().unwrap();

        let (exit, _) = run_script(&store, "");
        assert_eq!(exit, ShellExit::EndOfInput);

        let (exit, _) = run_script(&store, "1\nhalf");
        assert_eq!(exit, ShellExit::EndOfInput);
        assert_eq!(store.count_records().unwrap(), 0);
    }
}
