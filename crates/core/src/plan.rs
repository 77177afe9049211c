//! Sync plan handed to the workspace materializer

use crate::error::ConfigError;
use crate::revision::RevisionSpec;
use crate::strategy::Populate;
use crate::view::ViewMap;

/// Everything needed to materialize a workspace at one revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    pub view: ViewMap,
    pub revision: RevisionSpec,
    pub populate: Populate,
}

impl SyncPlan {
    /// Build a plan; the view must hold at least one rule
    ///
    /// Every rule's client side is a parsed `DepotPath`, so a non-empty view
    /// always names its client.
    pub fn new(view: ViewMap, revision: RevisionSpec, populate: Populate) -> Result<Self, ConfigError> {
        if view.is_empty() {
            return Err(ConfigError::NoView);
        }
        Ok(Self {
            view,
            revision,
            populate,
        })
    }

    /// `//<client>/...`
    pub fn client_path(&self) -> String {
        format!("//{}/...", self.view.client_root().unwrap_or_default())
    }

    /// Ordered command argument lists: pre-sync cleanup, sync, then unshelve
    /// for review builds
    pub fn commands(&self) -> Vec<Vec<String>> {
        let client_path = self.client_path();
        let mut commands = self.populate.pre_sync_args(&client_path);
        commands.push(self.populate.sync_args(&client_path, &self.revision));

        if let RevisionSpec::ShelvedReview { review, .. } = &self.revision {
            if !self.populate.is_preview() {
                commands.push(vec![
                    "unshelve".to_string(),
                    "-f".to_string(),
                    "-s".to_string(),
                    review.to_string(),
                ]);
            }
        }

        commands
    }
}
