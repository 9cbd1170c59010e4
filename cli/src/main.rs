use std::io::Read;
use std::path::PathBuf;

use structopt::StructOpt;

use mailgun_relay::{Attachments, Config, Mailer, ProviderResponse};

mod probe;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mailgun-send",
    about = "Send transactional email through the Mailgun API. The message body is read from stdin."
)]
struct Opt {
    /// Config file, merged with MAILGUN_* environment variables
    #[structopt(short, long)]
    config: Option<String>,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Send to a single recipient from the default sender
    Simple {
        #[structopt(short, long)]
        to: String,

        #[structopt(short, long)]
        subject: String,

        /// Also send a copy to the default sender
        #[structopt(long)]
        copy: bool,
    },

    /// Send from the given sender, or the default sender if omitted
    #[structopt(name = "from")]
    SendFrom {
        #[structopt(long, default_value = "")]
        sender: String,

        #[structopt(short, long, required = true)]
        to: Vec<String>,

        #[structopt(short, long)]
        subject: String,
    },

    /// Send from the default sender with optional attachments and bcc
    Send {
        #[structopt(short, long, required = true)]
        to: Vec<String>,

        #[structopt(short, long)]
        subject: String,

        #[structopt(long)]
        copy: bool,

        #[structopt(short, long, parse(from_os_str))]
        attach: Vec<PathBuf>,

        #[structopt(long)]
        bcc: Vec<String>,
    },

    /// Send a local file to check the Mailgun setup. Never fails.
    Probe {
        #[structopt(long, parse(from_os_str))]
        file: PathBuf,

        #[structopt(long)]
        sender: String,

        #[structopt(long, default_value = "")]
        sender_display: String,

        #[structopt(short, long, required = true)]
        to: Vec<String>,

        #[structopt(long)]
        bcc: Vec<String>,
    },
}

fn read_attachments(paths: &[PathBuf]) -> Result<Option<Attachments>, Box<dyn std::error::Error>> {
    if paths.is_empty() {
        return Ok(None);
    }

    let mut attachments = Attachments::new();

    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| format!("Not a file: {}", path.display()))?;

        attachments.insert(name, std::fs::read(path)?);
    }

    Ok(Some(attachments))
}

fn read_body() -> Result<String, Box<dyn std::error::Error>> {
    let mut body = String::new();
    std::io::stdin().read_to_string(&mut body)?;
    Ok(body)
}

fn as_strs(v: &[String]) -> Vec<&str> {
    v.iter().map(String::as_str).collect()
}

fn load_mailer(config_path: Option<&str>) -> Result<Mailer, mailgun_relay::Error> {
    Mailer::new(Config::load(config_path)?)
}

fn run(opt: Opt) -> Result<(), Box<dyn std::error::Error>> {
    let Opt { config, cmd } = opt;

    let resp = match cmd {
        Command::Probe {
            file,
            sender,
            sender_display,
            to,
            bcc,
        } => {
            let probe = probe::Probe {
                file,
                sender,
                sender_display,
                to,
                bcc,
            };
            probe::run_from_config(config.as_deref(), &probe);
            return Ok(());
        }
        Command::Simple { to, subject, copy } => {
            let mailer = load_mailer(config.as_deref())?;
            mailer.send_simple(copy, &to, &subject, &read_body()?)?
        }
        Command::SendFrom {
            sender,
            to,
            subject,
        } => {
            let mailer = load_mailer(config.as_deref())?;
            mailer.send_from(&sender, &as_strs(&to), &subject, &read_body()?)?
        }
        Command::Send {
            to,
            subject,
            copy,
            attach,
            bcc,
        } => {
            let mailer = load_mailer(config.as_deref())?;
            let attachments = read_attachments(&attach)?;
            let body = read_body()?;

            if bcc.is_empty() {
                mailer.send(copy, &as_strs(&to), &subject, &body, attachments)?
            } else {
                let bcc = as_strs(&bcc);
                mailer.send_with_bcc(copy, &as_strs(&to), &subject, &body, attachments, Some(bcc.as_slice()))?
            }
        }
    };

    if let Some(id) = ProviderResponse::parse(&resp).and_then(|r| r.id) {
        log::info!("Queued message {}", id);
    }

    println!("{}", resp);

    Ok(())
}

fn main() {
    // Init logger
    env_logger::builder().format_timestamp_micros().init();

    let opt = Opt::from_args();

    if let Err(e) = run(opt) {
        log::error!("Send failed: {}", e);
        std::process::exit(1);
    }
}
