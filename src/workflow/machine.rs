use std::sync::Arc;

use tracing::{info, warn};

use super::{MenuBundle, PlanningContext, PlanningService, Stage, View};
use crate::error::{PlannerError, Result};
use crate::models::{Menu, PantryEntry, ProductCatalog, ReconciledNeed, ShoppingList};
use crate::planner::{ensure_unique_names, reconcile, reset_purchased, synthesize, toggle_purchased};

/// Identifies the stage and generation a load was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LoadTicket {
    stage: Stage,
    generation: u64,
}

#[derive(Debug)]
enum LoadKind {
    Menu,
    Reconcile {
        menu: Menu,
        prior: ShoppingList,
        catalog: ProductCatalog,
    },
}

/// A stage load detached from the workflow, so it can run while the
/// workflow moves on. Its result is only applied if nothing changed.
#[derive(Debug)]
pub struct LoadRequest {
    ticket: LoadTicket,
    kind: LoadKind,
}

#[derive(Debug)]
enum StagePayload {
    Menu(MenuBundle),
    Reconciled {
        pantry: Vec<PantryEntry>,
        needs: Vec<ReconciledNeed>,
        list: ShoppingList,
    },
}

/// Finished load, waiting to be applied with [`Workflow::apply`].
#[derive(Debug)]
pub struct LoadResult {
    ticket: LoadTicket,
    payload: StagePayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// The stage has nothing to fetch.
    NothingToLoad,
    /// The workflow restarted or moved on; the result was dropped.
    Stale,
}

impl LoadRequest {
    pub fn stage(&self) -> Stage {
        self.ticket.stage
    }

    /// Perform the remote calls and the pure planning steps.
    pub async fn run(self, service: &PlanningService) -> Result<LoadResult> {
        let payload = match self.kind {
            LoadKind::Menu => StagePayload::Menu(service.load_menu_bundle().await?),
            LoadKind::Reconcile {
                menu,
                prior,
                catalog,
            } => {
                let demand = service.submit_menu(&menu).await?;
                let pantry = service.load_pantry().await?;

                ensure_unique_names("pantry", pantry.iter().map(|p| p.name.as_str()))?;
                ensure_unique_names("demand", demand.iter().map(|d| d.name.as_str()))?;

                let needs = reconcile(&pantry, &demand);
                let list = synthesize(&needs, &prior, &catalog);
                StagePayload::Reconciled {
                    pantry,
                    needs,
                    list,
                }
            }
        };

        Ok(LoadResult {
            ticket: self.ticket,
            payload,
        })
    }
}

/// Drives the planning stages over one shared [`PlanningContext`].
///
/// Exactly one stage is active. Leaving a stage requires its data to be in
/// the context; trying earlier is a caller bug and is reported as
/// [`PlannerError::PrematureTransition`]. The terminal stage is never left
/// by the machine itself; only [`restart`](Self::restart) starts over.
pub struct Workflow {
    stage: Stage,
    context: PlanningContext,
    service: Arc<PlanningService>,
}

impl Workflow {
    pub fn new(service: Arc<PlanningService>) -> Self {
        Self {
            stage: Stage::LoadMenu,
            context: PlanningContext::default(),
            service,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn context(&self) -> &PlanningContext {
        &self.context
    }

    pub fn service(&self) -> &PlanningService {
        &self.service
    }

    pub fn render(&self) -> View<'_> {
        self.stage.render(&self.context)
    }

    /// The menu, editable only while in [`Stage::EditMenu`].
    pub fn menu_mut(&mut self) -> Option<&mut Menu> {
        if self.stage == Stage::EditMenu {
            self.context.menu.as_mut()
        } else {
            None
        }
    }

    /// Describe the current stage's load, if it has one.
    pub fn begin_load(&self) -> Result<Option<LoadRequest>> {
        let ticket = LoadTicket {
            stage: self.stage,
            generation: self.context.generation(),
        };

        let kind = match self.stage {
            Stage::LoadMenu => LoadKind::Menu,
            Stage::LoadPantryAndReconcile => {
                let menu = self
                    .context
                    .menu
                    .clone()
                    .ok_or(PlannerError::PrematureTransition {
                        stage: Stage::EditMenu,
                    })?;
                LoadKind::Reconcile {
                    menu,
                    prior: self.context.prior_list(),
                    catalog: self.context.catalog.clone(),
                }
            }
            Stage::EditMenu | Stage::ReviewShoppingList => return Ok(None),
        };

        Ok(Some(LoadRequest { ticket, kind }))
    }

    /// Store a finished load, unless the workflow restarted or moved to
    /// another stage since it was issued.
    pub fn apply(&mut self, result: LoadResult) -> LoadOutcome {
        let current = LoadTicket {
            stage: self.stage,
            generation: self.context.generation(),
        };
        if result.ticket != current {
            warn!(
                "discarding stale {:?} load (generation {}, now {})",
                result.ticket.stage,
                result.ticket.generation,
                current.generation
            );
            return LoadOutcome::Stale;
        }

        match result.payload {
            StagePayload::Menu(bundle) => {
                self.context.menu = Some(bundle.menu);
                self.context.recipes = bundle.recipes;
                self.context.catalog = ProductCatalog::new(bundle.products);
                if self.context.shopping_list.is_none() {
                    self.context.shopping_list = Some(bundle.saved_list);
                }
            }
            StagePayload::Reconciled {
                pantry,
                needs,
                list,
            } => {
                self.context.pantry = Some(pantry);
                self.context.needs = Some(needs);
                self.context.shopping_list = Some(list);
            }
        }
        LoadOutcome::Applied
    }

    /// Run the current stage's load to completion and apply it.
    pub async fn load(&mut self) -> Result<LoadOutcome> {
        let Some(request) = self.begin_load()? else {
            return Ok(LoadOutcome::NothingToLoad);
        };
        let service = Arc::clone(&self.service);
        let result = request.run(&service).await?;
        Ok(self.apply(result))
    }

    /// Move to the next stage.
    pub fn advance(&mut self) -> Result<Stage> {
        if self.stage.is_terminal() {
            return Err(PlannerError::NoNextStage { stage: self.stage });
        }
        if !self.stage.is_ready(&self.context) {
            return Err(PlannerError::PrematureTransition { stage: self.stage });
        }
        let Some(next) = self.stage.next() else {
            return Err(PlannerError::NoNextStage { stage: self.stage });
        };

        info!("{:?} -> {:?}", self.stage, next);
        self.stage = next;
        Ok(next)
    }

    /// Load and advance until the terminal stage, calling `on_stage` once
    /// per stage after its data is in place. Returns the visited stages.
    pub async fn run_to_review<F>(&mut self, mut on_stage: F) -> Result<Vec<Stage>>
    where
        F: FnMut(Stage, &mut PlanningContext) -> Result<()>,
    {
        let mut visited = Vec::new();
        loop {
            self.load().await?;
            on_stage(self.stage, &mut self.context)?;
            visited.push(self.stage);

            if self.stage.is_terminal() {
                return Ok(visited);
            }
            self.advance()?;
        }
    }

    /// Start over from [`Stage::LoadMenu`]. Loads still in flight become stale.
    pub fn restart(&mut self) {
        info!("restarting workflow from {:?}", self.stage);
        self.context.reset_for_restart();
        self.stage = Stage::LoadMenu;
    }

    fn list_mut(&mut self) -> Result<&mut ShoppingList> {
        if self.stage != Stage::ReviewShoppingList {
            return Err(PlannerError::PrematureTransition { stage: self.stage });
        }
        self.context
            .shopping_list
            .as_mut()
            .ok_or(PlannerError::PrematureTransition { stage: self.stage })
    }

    /// Persist the reviewed shopping list.
    pub async fn save(&mut self) -> Result<()> {
        let list = self.list_mut()?.clone();
        self.service.save_shopping_list(&list).await?;
        info!("saved shopping list with {} items", list.len());
        Ok(())
    }

    /// Clear every purchased mark on the reviewed list.
    pub fn reset_purchased(&mut self) -> Result<()> {
        let list = self.list_mut()?;
        *list = reset_purchased(list);
        Ok(())
    }

    /// Flip one item's purchased mark.
    pub fn toggle_purchased(&mut self, name: &str) -> Result<bool> {
        let list = self.list_mut()?;
        toggle_purchased(list, name)
            .ok_or_else(|| PlannerError::InvalidInput(format!("'{}' is not on the list", name)))
    }
}
