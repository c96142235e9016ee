use clap::{Parser, Subcommand};
use textbook::model::entity::{
    Chapter, ChapterCreate, Lesson, LessonCreate, Standard, StandardCreate, UserEntity, UserFlags,
};
use textbook::model::{CrudRepository, DatabaseError, DbConnection, ModelManager};
use textbook::web::AuthenticatedUser;

#[derive(Parser, Debug)]
#[command(about = "CLI tool for filling the textbook DB", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage chapters
    Chapter {
        #[command(subcommand)]
        action: ChapterCommands,
    },

    /// Manage lessons
    Lesson {
        #[command(subcommand)]
        action: LessonCommands,
    },

    /// Manage chapter standards
    Standard {
        #[command(subcommand)]
        action: StandardCommands,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChapterCommands {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        order_number: i32,
        /// Create the chapter hidden from learners
        #[arg(long, default_value_t = false)]
        inactive: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum LessonCommands {
    Add {
        /// Chapter name to attach the lesson to
        #[arg(long)]
        chapter_name: String,
        #[arg(long)]
        name: String,
        /// Path to a Markdown file with lesson content
        #[arg(long)]
        file: String,
        /// Position in the whole course
        #[arg(long)]
        lesson_order_number: i32,
        /// Position inside the chapter
        #[arg(long)]
        chapter_order_number: i32,
    },
}

#[derive(Subcommand, Debug)]
pub enum StandardCommands {
    Add {
        /// Chapter name to attach the standard to
        #[arg(long)]
        chapter_name: String,
        #[arg(long)]
        name: String,
    },
}

/// Flags left out keep their current value.
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    Flags {
        #[arg(long)]
        github_username: String,
        #[arg(long)]
        admin: Option<bool>,
        #[arg(long)]
        verified: Option<bool>,
        #[arg(long)]
        active: Option<bool>,
    },
}

async fn chapter_id_by_name(mm: &ModelManager, name: &str) -> Result<i32, DatabaseError> {
    let id = sqlx::query_scalar("SELECT id FROM chapters WHERE name = $1")
        .bind(name)
        .fetch_one(mm.executor())
        .await?;
    Ok(id)
}

#[tokio::main]
async fn main() -> textbook::error::AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL is not set"))?;
    let db_con = DbConnection::connect(&database_url)?;
    let mm = ModelManager::new(db_con);
    let actor = AuthenticatedUser::admin();

    match args.command {
        Commands::Chapter { action } => match action {
            ChapterCommands::Add { name, order_number, inactive } => {
                let chapter = Chapter::create(
                    &mm,
                    &actor,
                    ChapterCreate {
                        order_number,
                        name,
                        active: Some(!inactive),
                    },
                )
                .await?;
                println!("Chapter created: {:?}", chapter);
            }
        },

        Commands::Lesson { action } => match action {
            LessonCommands::Add {
                chapter_name,
                name,
                file,
                lesson_order_number,
                chapter_order_number,
            } => {
                let chapter_id = chapter_id_by_name(&mm, &chapter_name).await?;
                let content = std::fs::read_to_string(file)?;
                let lesson = Lesson::create(
                    &mm,
                    &actor,
                    LessonCreate {
                        chapter_id,
                        lesson_order_number,
                        chapter_order_number,
                        name,
                        content,
                        active: Some(true),
                    },
                )
                .await?;
                println!("Lesson created: {} ({})", lesson.name(), lesson.id());
            }
        },

        Commands::Standard { action } => match action {
            StandardCommands::Add { chapter_name, name } => {
                let chapter_id = chapter_id_by_name(&mm, &chapter_name).await?;
                let standard =
                    Standard::create(&mm, &actor, StandardCreate { chapter_id, name }).await?;
                println!("Standard created: {:?}", standard);
            }
        },

        Commands::User { action } => match action {
            UserCommands::Flags {
                github_username,
                admin,
                verified,
                active,
            } => {
                let user = UserEntity::find_by_github_username(&mm, &actor, &github_username)
                    .await?
                    .ok_or(DatabaseError::SqlxError(sqlx::Error::RowNotFound))?;

                let current = user.flags();
                let flags = UserFlags {
                    admin: admin.unwrap_or(current.admin),
                    verified: verified.unwrap_or(current.verified),
                    active: active.unwrap_or(current.active),
                };
                let user = user.set_flags(&mm, &actor, flags).await?;
                println!("User {} flags: {:?}", user.github_username(), user.flags());
            }
        },
    }

    Ok(())
}
