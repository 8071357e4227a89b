//! Project list kept next to the board.
//!
//! Same lifecycle as the board: load (seeding examples when the store is
//! empty), mutate in memory, then overwrite the `projects` snapshot.

use chrono::NaiveDate;
use kanban_models::{builtin_templates, example_projects, Project, ProjectId, ProjectTemplate};
use kanban_persistence::{codec, SnapshotStore, PROJECTS_KEY};
use tracing::info;

use crate::commit::{write_snapshot, SaveOutcome};
use crate::error::{BoardError, Result, ValidationError};

/// Registry of projects and the templates they can be created from.
pub struct ProjectRegistry<S: SnapshotStore> {
    store: S,
    projects: Option<Vec<Project>>,
    templates: Vec<ProjectTemplate>,
}

impl<S: SnapshotStore> ProjectRegistry<S> {
    /// Creates a registry over `store` with the built-in templates.
    pub fn new(store: S) -> Self {
        Self {
            store,
            projects: None,
            templates: builtin_templates(),
        }
    }

    /// Reads the project list, seeding the example projects when the store
    /// has none.
    ///
    /// # Errors
    /// `Persistence` if the store cannot be read or the snapshot is invalid.
    pub fn load(&mut self) -> Result<SaveOutcome> {
        match self.store.get(PROJECTS_KEY)? {
            Some(data) => {
                let projects = codec::decode_projects(&data)?;
                info!(count = projects.len(), "Loaded projects");
                self.projects = Some(projects);
                Ok(SaveOutcome::Skipped)
            }
            None => {
                info!("No project snapshot; seeding examples");
                let projects = example_projects();
                let save = write_snapshot(&self.store, PROJECTS_KEY, &projects);
                self.projects = Some(projects);
                Ok(save)
            }
        }
    }

    /// Current projects, in creation order.
    pub fn projects(&self) -> Result<&[Project]> {
        self.projects.as_deref().ok_or(BoardError::NotLoaded)
    }

    /// Available templates.
    pub fn templates(&self) -> &[ProjectTemplate] {
        &self.templates
    }

    /// Adds a project that has not started yet.
    ///
    /// # Errors
    /// `Validation` if the name is blank.
    pub fn create(&mut self, name: &str, deadline: NaiveDate) -> Result<(ProjectId, SaveOutcome)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyProjectName.into());
        }
        self.insert(Project::new(name, deadline))
    }

    /// Adds a project from a template, due thirty days after `today`.
    ///
    /// # Errors
    /// `Validation` if no template has that id.
    pub fn create_from_template(
        &mut self,
        template_id: &str,
        today: NaiveDate,
    ) -> Result<(ProjectId, SaveOutcome)> {
        let template = self
            .templates
            .iter()
            .find(|template| template.id == template_id)
            .ok_or_else(|| ValidationError::UnknownTemplate(template_id.to_string()))?;
        let project = Project::from_template(template, today);
        self.insert(project)
    }

    /// Deletes a project.
    ///
    /// # Errors
    /// `ProjectNotFound` if no project has that id.
    pub fn delete(&mut self, id: &ProjectId) -> Result<(Project, SaveOutcome)> {
        let projects = self.projects.as_mut().ok_or(BoardError::NotLoaded)?;
        let index = projects
            .iter()
            .position(|project| &project.id == id)
            .ok_or_else(|| BoardError::ProjectNotFound(id.clone()))?;
        let removed = projects.remove(index);

        let save = write_snapshot(&self.store, PROJECTS_KEY, projects.as_slice());
        info!(project_id = %id, name = %removed.name, "Deleted project");
        Ok((removed, save))
    }

    fn insert(&mut self, project: Project) -> Result<(ProjectId, SaveOutcome)> {
        let projects = self.projects.as_mut().ok_or(BoardError::NotLoaded)?;
        let id = project.id.clone();
        info!(project_id = %id, name = %project.name, deadline = %project.deadline, "Created project");
        projects.push(project);

        let save = write_snapshot(&self.store, PROJECTS_KEY, projects.as_slice());
        Ok((id, save))
    }
}
