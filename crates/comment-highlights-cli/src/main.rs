use anyhow::{Context, Result};
use comment_highlights_config::Config;
use comment_highlights_engine::{
    ActivationChannel, Editor, EditorHost, HighlightSchema, Subscription, io,
};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

enum Command {
    List,
    Show(String),
    Remove(String),
}

impl Command {
    fn parse(args: &[String]) -> Option<Self> {
        match args {
            [cmd] if cmd == "list" => Some(Command::List),
            [cmd, id] if cmd == "show" => Some(Command::Show(id.clone())),
            [cmd, id] if cmd == "remove" => Some(Command::Remove(id.clone())),
            _ => None,
        }
    }
}

struct App {
    document_path: PathBuf,
    editor: Editor,
    schema: HighlightSchema,
    channel: ActivationChannel,
    _sidebar: Subscription,
}

impl App {
    fn new(document_path: PathBuf, config: &Config) -> Result<Self> {
        let doc = io::read_document(&document_path)
            .with_context(|| format!("loading {}", document_path.display()))?;
        let editor = Editor::with_history_limit(doc, config.history_limit);
        let schema = HighlightSchema::new(
            config.schema.mark_type.clone(),
            config.schema.id_attribute.clone(),
        );

        // Stand-in for a comment sidebar following the active highlight
        let channel = ActivationChannel::new();
        let sidebar = channel.subscribe(|event| match &event.highlight_id {
            Some(id) => println!("sidebar: highlight {id} active"),
            None => println!("sidebar: no active highlight"),
        });

        Ok(Self {
            document_path,
            editor,
            schema,
            channel,
            _sidebar: sidebar,
        })
    }

    fn list(&self) {
        let doc = self.editor.document();
        let ids = self.schema.highlight_ids(doc);
        if ids.is_empty() {
            println!("No highlights");
            return;
        }
        for id in ids {
            let spans: Vec<String> = self
                .schema
                .find_all(doc, &id)
                .iter()
                .map(|m| m.span.to_string())
                .collect();
            println!("{id}\t{}", spans.join(" "));
        }
    }

    fn show(&self, id: &str) {
        let doc = self.editor.document();
        let matches = self.schema.find_all(doc, id);
        if matches.is_empty() {
            println!("Highlight {id} not found");
            return;
        }
        for m in &matches {
            println!("{}\t{:?}", m.span, m.node.text);
        }
        self.channel.publish(Some(id));
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        if !self.schema.remove(&mut self.editor, id) {
            println!("Highlight {id} not found");
            return Ok(());
        }
        io::write_document(&self.document_path, self.editor.document())
            .with_context(|| format!("saving {}", self.document_path.display()))?;
        println!("Removed highlight {id}");
        self.channel.publish(None);
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("comment-highlights-cli");
    let usage = format!("Usage: {program} <document.json> <list | show ID | remove ID>");

    let Some((path, command)) = args
        .get(1)
        .zip(args.get(2..).and_then(Command::parse))
    else {
        eprintln!("{usage}");
        process::exit(1);
    };

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            log::warn!("Failed to load config file, using defaults: {e}");
            Config::default()
        }
    };
    log::debug!("Config: {config:?}");

    let document_path = config.resolve_document(Path::new(path));
    let mut app = App::new(document_path, &config)?;

    match command {
        Command::List => app.list(),
        Command::Show(id) => app.show(&id),
        Command::Remove(id) => app.remove(&id)?,
    }

    Ok(())
}
