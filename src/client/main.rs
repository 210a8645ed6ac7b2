/**
 * xfdocs Editor Entry Point
 *
 * Terminal editor: reads commands from stdin and prints remote edits to the
 * open document as they arrive on the cable.
 */

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use xfdocs::client::command::HELP;
use xfdocs::client::{cable, CableEvent, Command, Config, DocClient, DocumentApi, Editor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    println!("Connecting to {}", config.server_url());

    let mut editor = Editor::new(DocClient::new(config.clone()));
    if !editor.init().await {
        report_notice(&mut editor);
    }
    print_list(&editor);

    let mut cable = cable::subscribe(config, None);
    let mut cable_open = true;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => run_command(&mut editor, command).await,
                    Err(e) => println!("{}", e),
                }
            }
            event = cable.recv(), if cable_open => match event {
                Some(CableEvent::Message(message)) => {
                    if editor.apply_remote(&message) {
                        println!("[remote edit]");
                        print_open(&editor);
                    }
                }
                Some(CableEvent::Status(status)) => {
                    tracing::info!("[Cable] {:?}", status);
                }
                None => {
                    println!("Realtime updates stopped");
                    cable_open = false;
                }
            },
        }
    }

    cable.unsubscribe();
    Ok(())
}

async fn run_command<A: DocumentApi>(editor: &mut Editor<A>, command: Command) {
    match command {
        Command::List => {
            editor.init().await;
            print_list(editor);
        }
        Command::New(title) => {
            editor.new_document_mut().title = title;
            if let Some(doc) = editor.create().await {
                println!("Created #{} {}", doc.id, doc.title);
            }
        }
        Command::Open(id) => {
            if editor.start_edit(id) {
                print_open(editor);
            } else {
                println!("No document #{} (try 'list')", id);
            }
        }
        Command::Edit(body) => {
            if !editor.set_body(body) {
                println!("No document open (try 'open <id>')");
            } else if editor.edit().await {
                println!("Saved");
            }
        }
        Command::Show => print_open(editor),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    report_notice(editor);
}

fn report_notice<A: DocumentApi>(editor: &mut Editor<A>) {
    if let Some(notice) = editor.take_notice() {
        println!("{}", notice);
    }
}

fn print_list<A: DocumentApi>(editor: &Editor<A>) {
    if editor.documents().is_empty() {
        println!("No documents yet (try 'new <title>')");
        return;
    }
    for doc in editor.documents() {
        let marker = if editor.edited_id() == Some(doc.id) { "*" } else { " " };
        println!("{} #{} {}", marker, doc.id, doc.title);
    }
}

fn print_open<A: DocumentApi>(editor: &Editor<A>) {
    match editor.edited_document() {
        Some(doc) => println!("#{} {}\n{}", doc.id, doc.title, doc.body),
        None => println!("No document open"),
    }
}
