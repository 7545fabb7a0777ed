// ABOUTME: Entry point for the gradebook binary.
// ABOUTME: Parses CLI arguments, initializes tracing, and dispatches record operations.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use gradebook_core::{Gender, NewStudent, Student, StudentUpdate};
use gradebook_store::{Roster, SearchQuery};

#[derive(Parser)]
#[command(name = "gradebook", version, about = "Student record manager backed by a CSV roster")]
struct Cli {
    /// Path to the roster CSV file.
    #[arg(long, default_value = "students.csv")]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new student.
    Add(AddArgs),
    /// Print every student.
    List {
        /// Emit records as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Look up students by roll number or name fragment.
    Find(FindArgs),
    /// Change fields on an existing student.
    Update(UpdateArgs),
    /// Delete a student.
    Remove {
        /// Roll number of the student to delete (case-insensitive).
        roll_no: String,
    },
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    roll_no: String,
    #[arg(long)]
    name: String,
    /// Age in years, 15 to 100.
    #[arg(long)]
    age: u32,
    /// M, F, or OTHER.
    #[arg(long)]
    gender: Gender,
    #[arg(long)]
    department: String,
    /// Semester, 1 to 8.
    #[arg(long)]
    semester: u32,
    /// Marks out of 100.
    #[arg(long)]
    marks: f64,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct FindArgs {
    /// Exact roll number (case-insensitive).
    #[arg(long)]
    roll_no: Option<String>,
    /// Substring of the student name (case-insensitive).
    #[arg(long)]
    name: Option<String>,
}

#[derive(Args)]
struct UpdateArgs {
    /// Roll number of the student to update (case-insensitive).
    roll_no: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    age: Option<u32>,
    #[arg(long)]
    gender: Option<Gender>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    semester: Option<u32>,
    /// New marks; GPA and grade are recomputed.
    #[arg(long)]
    marks: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gradebook=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let mut roster = Roster::open(&cli.file)
        .with_context(|| format!("opening roster at {}", cli.file.display()))?;
    tracing::info!(
        "roster at {} holds {} students",
        roster.path().display(),
        roster.len()
    );

    match cli.command {
        Command::Add(args) => {
            let student = roster.create(NewStudent {
                roll_no: args.roll_no,
                name: args.name,
                age: args.age,
                gender: args.gender,
                department: args.department,
                semester: args.semester,
                marks: args.marks,
            })?;
            println!(
                "Added {} (roll no {}): GPA {}, grade {}",
                student.name, student.roll_no, student.gpa, student.grade
            );
        }

        Command::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(roster.all())?);
            } else {
                print_table(roster.all());
            }
        }

        Command::Find(args) => {
            let query = match (args.roll_no, args.name) {
                (Some(roll_no), _) => SearchQuery::RollNo(roll_no),
                (_, Some(name)) => SearchQuery::NameContains(name),
                _ => unreachable!("clap enforces exactly one of --roll-no / --name"),
            };
            let found = roster.find(&query);
            if found.is_empty() {
                println!("No student found with the given criteria.");
            } else {
                println!("Found {} student(s):", found.len());
                for student in found {
                    print_detail(student);
                }
            }
        }

        Command::Update(args) => {
            let student = roster.update(
                &args.roll_no,
                StudentUpdate {
                    name: args.name,
                    age: args.age,
                    gender: args.gender,
                    department: args.department,
                    semester: args.semester,
                    marks: args.marks,
                },
            )?;
            println!("Updated {} (roll no {}):", student.name, student.roll_no);
            print_detail(&student);
        }

        Command::Remove { roll_no } => {
            let removed = roster.remove(&roll_no)?;
            println!(
                "Removed {} (roll no {}, {})",
                removed.name, removed.roll_no, removed.department
            );
        }
    }

    Ok(())
}

fn print_table(students: &[Student]) {
    if students.is_empty() {
        println!("No students in the roster.");
        return;
    }

    println!(
        "{:<10} {:<20} {:<5} {:<8} {:<15} {:<5} {:<7} {:<5} {:<5}",
        "Roll No", "Name", "Age", "Gender", "Department", "Sem", "Marks", "GPA", "Grade"
    );
    println!("{}", "-".repeat(86));
    for s in students {
        println!(
            "{:<10} {:<20} {:<5} {:<8} {:<15} {:<5} {:<7.1} {:<5.1} {:<5}",
            s.roll_no, s.name, s.age, s.gender, s.department, s.semester, s.marks, s.gpa, s.grade
        );
    }
    println!("\nTotal students: {}", students.len());
}

fn print_detail(s: &Student) {
    println!("  Roll No:    {}", s.roll_no);
    println!("  Name:       {}", s.name);
    println!("  Age:        {}", s.age);
    println!("  Gender:     {}", s.gender);
    println!("  Department: {}", s.department);
    println!("  Semester:   {}", s.semester);
    println!("  Marks:      {}", s.marks);
    println!("  GPA:        {}", s.gpa);
    println!("  Grade:      {}", s.grade);
}
