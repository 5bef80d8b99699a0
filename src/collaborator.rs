//! The things a comparison times.
//!
//! Any `FnMut(u64) -> Result<(), E>` closure is a collaborator. [`PythonModule`] drives the
//! `test(n)` function of a Python module through a long-lived interpreter.

use std::fmt;
use std::hint::black_box;
use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};

/// A black-box operation that performs an amount of work selected by `workload`.
///
/// The meaning of the workload size belongs entirely to the collaborator.
pub trait Collaborator {
    /// Runs the workload to completion. The error message is reported alongside the
    /// collaborator's label.
    fn run(&mut self, workload: u64) -> ::std::result::Result<(), String>;
}

impl<F, E> Collaborator for F
where
    F: FnMut(u64) -> ::std::result::Result<(), E>,
    E: fmt::Display,
{
    fn run(&mut self, workload: u64) -> ::std::result::Result<(), String> {
        (self)(black_box(workload)).map_err(|e| e.to_string())
    }
}

// Imports the module once, then calls `test(n)` for every workload read from stdin and
// acknowledges each completed call on a private duplicate of stdout. Fd 1 is pointed at stderr
// before the import so nothing the module prints can be mistaken for an acknowledgement.
const SHIM: &str = r#"
import importlib, os, sys
ack = os.fdopen(os.dup(1), "w", 1)
os.dup2(2, 1)
module = importlib.import_module(sys.argv[1])
print("ready", file=ack)
for line in iter(sys.stdin.readline, ""):
    module.test(int(line))
    print("ok", file=ack)
"#;

// Only the tail of the child's output is kept for error messages.
const OUTPUT_TAIL: usize = 64 * 1024;

// Reads the child's stderr until it closes so a chatty collaborator never blocks on a full pipe.
fn drain(mut stderr: ChildStderr, tail: Arc<Mutex<Vec<u8>>>) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut chunk = [0u8; 8192];
        loop {
            match stderr.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    let mut tail = match tail.lock() {
                        Ok(tail) => tail,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    tail.extend_from_slice(&chunk[..n]);
                    if tail.len() > OUTPUT_TAIL {
                        let excess = tail.len() - OUTPUT_TAIL;
                        tail.drain(..excess);
                    }
                }
            }
        }
    })
}

/// Calls `<module>.test(workload)` in a Python interpreter that stays alive between calls.
///
/// The interpreter is started and the module imported by [`PythonModule::spawn`], so neither
/// cost falls inside a measurement. Each call costs one line written to the child and one line
/// read back. Anything the module prints goes to the child's stderr, which is drained in the
/// background and quoted in the error if the module fails.
pub struct PythonModule {
    module: String,
    buffer: String,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    output: Arc<Mutex<Vec<u8>>>,
    drainer: Option<JoinHandle<()>>,
    child: Child,
}

impl PythonModule {
    /// Imports `module` with the `python3` found on `PATH`, from the current directory.
    pub fn spawn(module: &str) -> Result<PythonModule> {
        PythonModule::spawn_command(Command::new("python3"), module)
    }

    /// Imports `module` with an interpreter command that the caller has already configured
    /// (eg. a different interpreter, working directory or `PYTHONPATH`).
    pub fn spawn_command(mut cmd: Command, module: &str) -> Result<PythonModule> {
        let interpreter = cmd.get_program().to_string_lossy().into_owned();
        cmd.args(["-u", "-c", SHIM, module])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| Error::Spawn {
            program: interpreter.clone(),
            source,
        })?;
        info!("Started `{}` for module {} (pid {})", interpreter, module, child.id());

        // All three pipes were requested above.
        let streams = (child.stdin.take(), child.stdout.take(), child.stderr.take());
        let (stdin, stdout, stderr) = match streams {
            (Some(stdin), Some(stdout), Some(stderr)) => (stdin, stdout, stderr),
            _ => {
                let _ = child.kill();
                return Err(Error::Spawn {
                    program: interpreter,
                    source: std::io::Error::new(
                        std::io::ErrorKind::BrokenPipe,
                        "child process has no standard streams",
                    ),
                });
            }
        };

        let output = Arc::new(Mutex::new(Vec::new()));
        let drainer = drain(stderr, Arc::clone(&output));
        let mut program = PythonModule {
            module: module.to_owned(),
            buffer: String::new(),
            stdin,
            stdout: BufReader::new(stdout),
            output,
            drainer: Some(drainer),
            child,
        };
        program
            .expect_line("ready")
            .map_err(|message| Error::Collaborator {
                label: module.to_owned(),
                message,
            })?;
        Ok(program)
    }

    /// The name of the imported module.
    pub fn module(&self) -> &str {
        &self.module
    }

    fn expect_line(&mut self, expected: &str) -> ::std::result::Result<(), String> {
        self.buffer.clear();
        match self.stdout.read_line(&mut self.buffer) {
            Err(e) => Err(format!("read from child stdout: {}", e)),
            Ok(0) => Err(self.child_failure()),
            Ok(_) if self.buffer.trim_end() == expected => Ok(()),
            Ok(_) => Err(format!(
                "expected `{}` from child, got `{}`",
                expected,
                self.buffer.trim_end()
            )),
        }
    }

    // The child closed its acknowledgement channel, so the tail of its output explains why.
    fn child_failure(&mut self) -> String {
        let status = self.child.wait();
        self.join_drainer();
        let output = match self.output.lock() {
            Ok(output) => String::from_utf8_lossy(&output).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        };
        let output = output.trim();
        match status {
            Ok(status) if output.is_empty() => format!("child exited with {}", status),
            Ok(status) => format!("child exited with {}:\n{}", status, output),
            Err(e) => format!("child exited; wait failed: {}", e),
        }
    }

    fn join_drainer(&mut self) {
        if let Some(drainer) = self.drainer.take() {
            if drainer.join().is_err() {
                debug!("stderr reader for module {} panicked", self.module);
            }
        }
    }
}

impl Collaborator for PythonModule {
    fn run(&mut self, workload: u64) -> ::std::result::Result<(), String> {
        if let Err(e) = writeln!(self.stdin, "{}", workload) {
            return Err(match e.kind() {
                std::io::ErrorKind::BrokenPipe => self.child_failure(),
                _ => format!("write into child stdin: {}", e),
            });
        }
        self.expect_line("ok")
    }
}

impl Drop for PythonModule {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            debug!("Unable to kill child for module {}: {}", self.module, e);
        }
        let _ = self.child.wait();
        self.join_drainer();
    }
}
