use notelink::config::{self, NotelinkConfig, write_config};
use notelink::graph::RelationGraph;
use notelink::output::{OutputMode, emit_success};
use notelink::record::{Record, parse_related_ids};
use notelink::render::GraphFormat;
use notelink::shell::{Shell, ShellExit};
use notelink::storage::SqliteStore;
use notelink::ui::{self, Icons, TableBuilder};
use std::path::Path;

/// Open the store at `database`, run `f` against it and close it again.
///
/// The store is closed on every path; the first failure wins.
pub fn with_store<T>(
    database: &Path,
    f: impl FnOnce(&SqliteStore) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    config::ensure_db_dir(database)?;
    let store = SqliteStore::open(database)?;
    tracing::debug!("Using database {}", database.display());

    let result = f(&store);
    let closed = store.close();
    let value = result?;
    closed?;
    Ok(value)
}

pub fn run_init(config_path: &Path, database: &Path, force: bool, output_mode: OutputMode) -> anyhow::Result<()> {
    let config = NotelinkConfig {
        database: Some(database.display().to_string()),
    };
    // A refused config must leave no database file behind
    write_config(config_path, &config, force)?;
    with_store(database, |store| {
        tracing::debug!(records = store.count_records()?, "Store ready");
        Ok(())
    })?;

    if output_mode.is_human() {
        ui::success(&format!("Wrote {}", config_path.display()));
        ui::info("Database", &database.display().to_string());
    } else {
        let data = serde_json::json!({
            "config": config_path.display().to_string(),
            "database": database.display().to_string(),
        });
        emit_success(output_mode, "init", data)?;
    }
    Ok(())
}

pub fn run_insert(
    store: &SqliteStore,
    id: String,
    content: String,
    related: Option<&str>,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let record = Record::new(id, content, related.map(parse_related_ids).unwrap_or_default());
    store.insert_record(&record)?;

    if output_mode.is_human() {
        ui::success(&format!("Inserted record {}", ui::record_id(&record.id)));
    } else {
        emit_success(output_mode, "insert", serde_json::to_value(&record)?)?;
    }
    Ok(())
}

pub fn run_search(store: &SqliteStore, keyword: &str, output_mode: OutputMode) -> anyhow::Result<()> {
    let results = store.search_by_keyword(keyword)?;

    if !output_mode.is_human() {
        return Ok(emit_success(output_mode, "search", serde_json::to_value(&results)?)?);
    }

    ui::header(Icons::SEARCH, &format!("Searching for '{}'", keyword));
    if results.is_empty() {
        ui::empty("No records contain that keyword.");
    } else {
        println!("{}", ui::record_table(&results));
    }
    Ok(())
}

pub fn run_delete(store: &SqliteStore, id: &str, output_mode: OutputMode) -> anyhow::Result<()> {
    let removed = store.delete_record(id)?;

    if output_mode.is_human() {
        if removed == 0 {
            ui::empty(&format!("No record with id {} was found.", id));
        } else {
            println!("{} Deleted record {}", Icons::DEL, ui::record_id(id));
        }
    } else {
        let data = serde_json::json!({ "id": id, "removed": removed });
        emit_success(output_mode, "delete", data)?;
    }
    Ok(())
}

pub fn run_list(store: &SqliteStore, output_mode: OutputMode) -> anyhow::Result<()> {
    let records = store.list_all()?;

    if !output_mode.is_human() {
        return Ok(emit_success(output_mode, "list", serde_json::to_value(&records)?)?);
    }

    if records.is_empty() {
        ui::empty("The store is empty.");
    } else {
        ui::header(Icons::NOTE, &format!("{} records", records.len()));
        println!("{}", ui::record_table(&records));
    }
    Ok(())
}

pub fn run_show(store: &SqliteStore, id: &str, output_mode: OutputMode) -> anyhow::Result<()> {
    let record = store.get_record(id)?;

    if !output_mode.is_human() {
        return Ok(emit_success(output_mode, "show", serde_json::to_value(&record)?)?);
    }

    let Some(record) = record else {
        ui::empty(&format!("No record with id {} was found.", id));
        return Ok(());
    };

    ui::header(Icons::NOTE, &ui::record_id(&record.id));
    println!("{}", record.content);

    ui::section("Related");
    if record.related_ids.is_empty() {
        println!("  {}", ui::dim("(none)"));
    }
    for related in &record.related_ids {
        if store.get_record(related)?.is_some() {
            println!("  {} {}", Icons::LINK, ui::record_id(related));
        } else {
            println!("  {} {} {}", Icons::GHOST, ui::dangling_id(related), ui::dim("(missing)"));
        }
    }
    Ok(())
}

pub fn run_graph(store: &SqliteStore, format: GraphFormat, output_mode: OutputMode) -> anyhow::Result<()> {
    let graph = RelationGraph::from_relations(store.list_all_with_relations()?);
    tracing::debug!(nodes = graph.node_count(), edges = graph.edge_count(), %format, "Built relation graph");

    if !output_mode.is_human() {
        return Ok(emit_success(output_mode, "graph", serde_json::to_value(&graph)?)?);
    }

    if graph.is_empty() && format == GraphFormat::Text {
        ui::empty("The store is empty.");
        return Ok(());
    }

    print!("{}", format.render(&graph)?);
    Ok(())
}

pub fn run_stats(store: &SqliteStore, database: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let records = store.count_records()?;
    let graph = RelationGraph::from_relations(store.list_all_with_relations()?);
    let stats = graph.stats();

    if !output_mode.is_human() {
        let data = serde_json::json!({
            "database": database.display().to_string(),
            "records": records,
            "graph": stats,
            "dangling": graph.dangling_nodes(),
        });
        return Ok(emit_success(output_mode, "stats", data)?);
    }

    ui::header(Icons::STATS, &format!("Notelink Statistics ({})", database.display()));
    let mut table = TableBuilder::new();
    table.add_row("Records", &records.to_string());
    table.add_row("Nodes", &stats.nodes.to_string());
    table.add_row("Dangling", &stats.dangling.to_string());
    table.add_row("Edges", &stats.edges.to_string());
    println!("{}", table.build());

    let dangling = graph.dangling_nodes();
    if !dangling.is_empty() {
        ui::section("Dangling references");
        for id in dangling {
            let referrers = graph.predecessors(id).join(", ");
            println!("  {} {} {}", Icons::GHOST, ui::dangling_id(id), ui::dim(&format!("<- {}", referrers)));
        }
    }
    Ok(())
}

pub fn run_shell(store: &SqliteStore, graph_format: GraphFormat) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    let exit = Shell::new(store, stdin.lock(), stdout.lock())
        .with_graph_format(graph_format)
        .run()?;

    if exit == ShellExit::EndOfInput {
        ui::warn("Input closed, leaving the menu.");
    }
    Ok(())
}
