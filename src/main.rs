mod log;

use itertools::join;
use std::path::PathBuf;

use rlisp::Interpreter;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
struct Opt {
    #[structopt(short = "d", long = "debug")]
    debug: bool,

    #[structopt(name = "INITFILE", parse(from_os_str), help = "lisp file to run on startup")]
    initfile: Option<PathBuf>,
}

const HISTFILE: &str = ".rlisp_hist";

fn main() {
    let opt = Opt::from_args();
    if opt.debug {
        log::debug(format!("set options: {:?}", opt))
    }

    let interpreter = Interpreter::new();
    if let Some(initfile) = &opt.initfile {
        if let Err(why) = interpreter.run_file(initfile) {
            log::warn(why);
        }
    }

    let mut rl = Editor::<()>::new();
    if let Err(err) = rl.load_history(HISTFILE) {
        if opt.debug {
            log::debug(format!("error opening history file: {}", err));
        }
    }

    let prompt = format!("{}rlisp λ{} ", "\x1b[1;94m", log::RESET);

    loop {
        let input = rl.readline(&prompt);

        match input {
            Ok(line) => {
                if line.len() > 0 {
                    if line.starts_with(":") {
                        if line == ":exit" {
                            break;
                        }
                        println!("{}", command(&interpreter, &line[1..]));
                    } else {
                        rl.add_history_entry(AsRef::<str>::as_ref(&line));
                        // one form's error is displayed and the loop keeps
                        // the same environment for the next line
                        match interpreter.interpret(&line) {
                            Ok(Some(result)) => println!("{}", result),
                            Ok(None) => {}
                            Err(err) => log::error(err),
                        }
                    }
                }
            }

            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }

            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }

            Err(err) => {
                log::error(err);
                break;
            }
        }
    }

    rl.save_history(HISTFILE).unwrap();
}

fn command(interpreter: &Interpreter, cmd: &str) -> String {
    match cmd {
        "env" => join(interpreter.env.borrow().vars.keys(), ", "),
        _ => "invalid command".to_owned(),
    }
}
