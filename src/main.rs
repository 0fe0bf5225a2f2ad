use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use menu_planner_rs::cli::{Cli, Command};
use menu_planner_rs::config::PlannerConfig;
use menu_planner_rs::error::Result;
use menu_planner_rs::interface::{
    display_products, display_shopping_list, display_view, edit_menu, prompt_purchased,
    prompt_yes_no, write_shopping_list_csv,
};
use menu_planner_rs::planner::reset_purchased;
use menu_planner_rs::remote::connect;
use menu_planner_rs::workflow::{PlanningService, Stage, Workflow};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = PlannerConfig::load_or_default(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }

    let remote = connect(&config.backend)?;
    let service = Arc::new(PlanningService::new(remote, &config.cache));
    service.start_sweepers();

    let result = match cli.command.unwrap_or_default() {
        Command::Plan { export } => cmd_plan(Arc::clone(&service), export.as_deref()).await,
        Command::Show => cmd_show(&service).await,
        Command::ResetPurchased => cmd_reset_purchased(&service).await,
        Command::Search { query } => cmd_search(&service, &query).await,
    };

    service.stop_sweepers();
    result
}

/// Walk the stages, letting the user edit the menu and tick purchases.
async fn cmd_plan(service: Arc<PlanningService>, export: Option<&Path>) -> Result<()> {
    let mut workflow = Workflow::new(service);

    loop {
        workflow
            .run_to_review(|stage, ctx| {
                display_view(&stage.render(ctx));
                if stage == Stage::EditMenu {
                    if let Some(menu) = ctx.menu.as_mut() {
                        if edit_menu(menu, &ctx.recipes)? {
                            display_view(&stage.render(ctx));
                        }
                    }
                }
                Ok(())
            })
            .await?;

        let Some(list) = workflow.context().shopping_list.as_ref() else {
            return Ok(());
        };
        let flipped = prompt_purchased(list)?;
        for name in &flipped {
            workflow.toggle_purchased(name)?;
        }
        if !flipped.is_empty() {
            display_view(&workflow.render());
        }

        if prompt_yes_no("Save the shopping list?", true)? {
            workflow.save().await?;
            println!("Shopping list saved.");
        }

        if !prompt_yes_no("Plan the week again?", false)? {
            break;
        }
        workflow.restart();
    }

    if let (Some(path), Some(list)) = (export, workflow.context().shopping_list.as_ref()) {
        write_shopping_list_csv(list, path)?;
        println!("Exported to {}", path.display());
    }

    Ok(())
}

/// Print the saved shopping list.
async fn cmd_show(service: &PlanningService) -> Result<()> {
    let list = service.load_shopping_list().await?;
    display_shopping_list(&list);
    Ok(())
}

/// Clear purchased marks on the saved list.
async fn cmd_reset_purchased(service: &PlanningService) -> Result<()> {
    let list = service.load_shopping_list().await?;
    if list.purchased_count() == 0 {
        println!("Nothing is marked purchased.");
        return Ok(());
    }

    let cleared = reset_purchased(&list);
    service.save_shopping_list(&cleared).await?;
    println!("Cleared {} purchased marks.", list.purchased_count());
    Ok(())
}

/// List catalog products matching `query`.
async fn cmd_search(service: &PlanningService, query: &str) -> Result<()> {
    let hits = service.search_products(query).await?;
    display_products(&hits, &format!("Products matching '{}'", query));
    Ok(())
}
