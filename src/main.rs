//! Folio - a content studio for a portfolio site's data module.

mod assets;
mod cli;
mod config;
mod document;
mod editor;
mod error;
mod logger;
mod posts;
mod preview;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{
    Cli, CollectionArg, Commands, Direction, FeatureCommands, FieldKindArg, ItemCommands,
    PostCommands, RecentCommands, TagCommands, UploadCommands,
};
use config::StudioConfig;
use document::DocumentStore;
use editor::binding::FieldKind;
use editor::collection::{CollectionEditor, CollectionKind};
use editor::{refs, tags};
use posts::NewPost;
use std::{fs, path::Path};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static StudioConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Sync => sync(config),
        Commands::Preview { .. } => preview::launch(config),
        Commands::Item { command } => run_item(config, command),
        Commands::Feature { command } => run_feature(config, command),
        Commands::Recent { command } => run_recent(config, command),
        Commands::Post { command } => run_post(config, command),
        Commands::Tag { command } => run_tag(config, command),
        Commands::Upload { command } => run_upload(config, command),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing folio.toml is fine; the defaults describe the common layout
/// (data.json and data.ts at the project root).
fn load_config(cli: &'static Cli) -> Result<StudioConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        StudioConfig::from_path(&config_path)?
    } else {
        StudioConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Load the document and bring it to a consistent state: defaults filled,
/// references repaired.
fn load_store(config: &StudioConfig) -> Result<DocumentStore> {
    let mut store = DocumentStore::load(&config.content.data)?;
    store.normalize();
    refs::resolve_featured(&mut store);
    Ok(store)
}

/// Write both persisted forms.
fn save_store(store: &DocumentStore, config: &StudioConfig) -> Result<()> {
    store.save(&config.content.data, &config.content.module)?;
    log!("store"; "wrote {}", config.content.data.display());
    log!("store"; "wrote {}", config.content.module.display());
    Ok(())
}

/// `sync`: load, repair, rewrite both forms.
fn sync(config: &StudioConfig) -> Result<()> {
    let store = load_store(config)?;
    save_store(&store, config)
}

const fn collection_kind(arg: CollectionArg) -> CollectionKind {
    match arg {
        CollectionArg::Papers => CollectionKind::Papers,
        CollectionArg::Projects => CollectionKind::Projects,
        CollectionArg::Posts => CollectionKind::Posts,
    }
}

const fn field_kind(arg: FieldKindArg) -> FieldKind {
    match arg {
        FieldKindArg::Text => FieldKind::Text,
        FieldKindArg::Int => FieldKind::Int,
        FieldKindArg::Flag => FieldKind::Flag,
        FieldKindArg::List => FieldKind::List,
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn run_item(config: &StudioConfig, command: &ItemCommands) -> Result<()> {
    match command {
        ItemCommands::Ls { collection } => {
            let store = load_store(config)?;
            let editor = CollectionEditor::new(collection_kind(*collection));
            for (index, label) in editor.list(&store).iter().enumerate() {
                println!("{index}: {label}");
            }
            Ok(())
        }
        ItemCommands::New { collection } => {
            let mut store = load_store(config)?;
            let editor = CollectionEditor::new(collection_kind(*collection));
            editor.create(&mut store);
            log!("store"; "created a record in {}", editor.kind().key());
            save_store(&store, config)
        }
        ItemCommands::Rm { collection, index } => {
            let mut store = load_store(config)?;
            let editor = CollectionEditor::new(collection_kind(*collection));
            if *index >= editor.len(&store) {
                bail!("no record at index {index}");
            }
            editor.delete(&mut store, *index);
            save_store(&store, config)
        }
        ItemCommands::Mv {
            collection,
            index,
            direction,
        } => {
            let mut store = load_store(config)?;
            let editor = CollectionEditor::new(collection_kind(*collection));
            match direction {
                Direction::Up => editor.move_up(&mut store, *index),
                Direction::Down => editor.move_down(&mut store, *index),
            }
            save_store(&store, config)
        }
        ItemCommands::Get {
            collection,
            index,
            key,
            kind,
        } => {
            let store = load_store(config)?;
            let editor = CollectionEditor::new(collection_kind(*collection));
            let binding = editor.binding(*index, key, field_kind(*kind));
            match kind {
                FieldKindArg::Flag => println!("{}", binding.current_flag(&store)),
                _ => println!("{}", binding.current(&store)),
            }
            Ok(())
        }
        ItemCommands::Set {
            collection,
            index,
            key,
            value,
            kind,
        } => {
            let mut store = load_store(config)?;
            let editor = CollectionEditor::new(collection_kind(*collection));
            if *index >= editor.len(&store) {
                bail!("no record at index {index}");
            }
            editor
                .binding(*index, key, field_kind(*kind))
                .commit(&mut store, value);
            save_store(&store, config)
        }
        ItemCommands::Tags {
            collection,
            index,
            tags: chosen,
        } => {
            let kind = collection_kind(*collection);
            let record_path = format!("{}.{index}", kind.key());
            match chosen {
                None => {
                    let store = load_store(config)?;
                    for tag in tags::tags_for(&store, &record_path) {
                        println!("{tag}");
                    }
                    Ok(())
                }
                Some(raw) => {
                    let mut store = load_store(config)?;
                    tags::set_tags(&mut store, &record_path, &split_tags(raw));
                    save_store(&store, config)
                }
            }
        }
    }
}

fn run_feature(config: &StudioConfig, command: &FeatureCommands) -> Result<()> {
    match command {
        FeatureCommands::Ls => {
            let store = load_store(config)?;
            for entry in refs::available_entries(&store) {
                println!("{} {} {}", entry.kind.ref_type(), entry.id, entry.label);
            }
            Ok(())
        }
        FeatureCommands::Show => {
            let store = load_store(config)?;
            match refs::featured_entry(&store) {
                Some(entry) => println!("{} ({} {})", entry.label, entry.kind.ref_type(), entry.id),
                None => println!("nothing featured"),
            }
            Ok(())
        }
        FeatureCommands::Set { r#type, id } => {
            let mut store = load_store(config)?;
            let Some(kind) = CollectionKind::from_ref_type(r#type) else {
                bail!(
                    "unknown reference type `{}`; expected paper, project, or blog",
                    r#type
                );
            };
            let Some(entry) = refs::available_entries(&store)
                .into_iter()
                .find(|entry| entry.kind == kind && entry.id == *id)
            else {
                bail!("no {} with id `{id}`", r#type);
            };
            refs::set_featured(&mut store, &entry);
            save_store(&store, config)
        }
    }
}

fn run_recent(config: &StudioConfig, command: &RecentCommands) -> Result<()> {
    match command {
        RecentCommands::Ls => {
            let store = load_store(config)?;
            for (index, label) in refs::manual_labels(&store).iter().enumerate() {
                println!("{index}: {label}");
            }
            Ok(())
        }
        RecentCommands::Add => {
            let mut store = load_store(config)?;
            refs::add_manual(&mut store);
            save_store(&store, config)
        }
        RecentCommands::Rm { index } => {
            let mut store = load_store(config)?;
            refs::delete_manual(&mut store, *index);
            save_store(&store, config)
        }
        RecentCommands::Mv { index, direction } => {
            let mut store = load_store(config)?;
            match direction {
                Direction::Up => refs::move_manual_up(&mut store, *index),
                Direction::Down => refs::move_manual_down(&mut store, *index),
            }
            save_store(&store, config)
        }
        RecentCommands::Set { index, key, value } => {
            let mut store = load_store(config)?;
            refs::manual_binding(*index, key, FieldKind::Text).commit(&mut store, value);
            save_store(&store, config)
        }
    }
}

fn run_post(config: &StudioConfig, command: &PostCommands) -> Result<()> {
    match command {
        PostCommands::New {
            title,
            date,
            excerpt,
            tags,
            body,
            pdf,
        } => {
            let mut store = load_store(config)?;

            let body = match body {
                Some(path) => fs::read_to_string(path)?,
                None => String::new(),
            };
            let post = NewPost {
                title: title.to_string(),
                date: date.clone().unwrap_or_default(),
                excerpt: excerpt.clone().unwrap_or_default(),
                tags: split_tags(tags.as_deref().unwrap_or_default()),
                pdf_attachment: pdf.clone().unwrap_or_default(),
                body,
            };

            let content = posts::create_post(&mut store, config, &post)?;
            log!("store"; "created {content}");
            save_store(&store, config)
        }
        PostCommands::Ls => {
            for file in assets::list_post_files(config) {
                println!("{file}");
            }
            Ok(())
        }
    }
}

fn run_tag(config: &StudioConfig, command: &TagCommands) -> Result<()> {
    match command {
        TagCommands::Add { name } => {
            let mut store = load_store(config)?;
            tags::add_tag(&mut store, name)?;
            save_store(&store, config)
        }
        TagCommands::Rm { name } => {
            let mut store = load_store(config)?;
            if !tags::remove_tag(&mut store, name) {
                log!("store"; "tag `{name}` is not registered");
                return Ok(());
            }
            save_store(&store, config)
        }
        TagCommands::Ls => {
            let store = load_store(config)?;
            for tag in tags::all(&store) {
                println!("{tag}");
            }
            Ok(())
        }
    }
}

fn run_upload(config: &StudioConfig, command: &UploadCommands) -> Result<()> {
    match command {
        UploadCommands::Add { file } => {
            let route = assets::import_upload(config, file)?;
            log!("store"; "imported {route}");
            println!("{}", assets::markdown_link(&route));
            Ok(())
        }
        UploadCommands::Ls { pdf } => {
            let routes = if *pdf {
                assets::list_pdfs(config)
            } else {
                assets::list_uploads(config)
            };
            for route in routes {
                println!("{route}");
            }
            Ok(())
        }
    }
}
