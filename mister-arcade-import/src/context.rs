//! State carried through one build run.

use std::collections::{HashMap, HashSet};

use mister_arcade_meta::{Descriptor, DescriptorKind, PathMapping};

use crate::batch::BatchWriter;

/// Counters reported at the end of a build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStats {
    /// Records read from the metadata export.
    pub games_found: u64,
    /// Descriptor files with a set name that reached resolution.
    pub descriptors_processed: u64,
    /// Rows that received a path (updated or inserted).
    pub games_updated: u64,
    /// Descriptors skipped because their set name was already resolved.
    pub duplicates_skipped: u64,
    /// Descriptor files that could not be read.
    pub errors: u64,
}

impl BuildStats {
    pub fn summary(&self) -> String {
        format!(
            "{} games found, {} descriptor files processed, {} games updated, \
             {} duplicates skipped, {} errors",
            self.games_found,
            self.descriptors_processed,
            self.games_updated,
            self.duplicates_skipped,
            self.errors
        )
    }
}

/// Everything the resolution engine accumulates during a run.
#[derive(Debug)]
pub struct RunContext {
    pub stats: BuildStats,
    pub mapping: PathMapping,
    pub batch: BatchWriter,
    /// Set names that already received a path, with the description that won.
    pub resolved: HashMap<String, String>,
    /// Canonical names whose default variant has been chosen.
    pub claimed_names: HashSet<String>,
    bootlegs: Vec<Descriptor>,
    homebrews: Vec<Descriptor>,
}

impl RunContext {
    pub fn new(mapping: PathMapping, batch_size: usize) -> Self {
        Self {
            stats: BuildStats::default(),
            mapping,
            batch: BatchWriter::new(batch_size),
            resolved: HashMap::new(),
            claimed_names: HashSet::new(),
            bootlegs: Vec::new(),
            homebrews: Vec::new(),
        }
    }

    /// Start a new directory pass. Deferred buckets never cross passes.
    pub fn begin_pass(&mut self) {
        self.bootlegs.clear();
        self.homebrews.clear();
    }

    /// Hold a bootleg or homebrew descriptor until the end of the pass.
    ///
    /// Returns the descriptor back when it is a standard one.
    pub fn defer(&mut self, descriptor: Descriptor) -> Option<Descriptor> {
        match descriptor.kind {
            DescriptorKind::Bootleg => self.bootlegs.push(descriptor),
            DescriptorKind::Homebrew => self.homebrews.push(descriptor),
            DescriptorKind::Standard => return Some(descriptor),
        }
        None
    }

    /// Drain the deferred buckets: bootlegs first, then homebrews.
    pub fn take_deferred(&mut self) -> Vec<Descriptor> {
        let mut deferred = std::mem::take(&mut self.bootlegs);
        deferred.append(&mut self.homebrews);
        deferred
    }

    pub fn deferred(&self) -> usize {
        self.bootlegs.len() + self.homebrews.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn descriptor(setname: &str, kind: DescriptorKind) -> Descriptor {
        Descriptor {
            setname: setname.to_string(),
            description: setname.to_string(),
            name: setname.to_string(),
            version: String::new(),
            year: 0,
            kind,
            path: PathBuf::from(format!("{setname}.mra")),
        }
    }

    #[test]
    fn test_deferred_order() {
        let mut ctx = RunContext::new(PathMapping::new("", ""), 20);
        assert!(ctx.defer(descriptor("hb", DescriptorKind::Homebrew)).is_none());
        assert!(ctx.defer(descriptor("bl", DescriptorKind::Bootleg)).is_none());
        let standard = ctx.defer(descriptor("std", DescriptorKind::Standard));
        assert_eq!(standard.unwrap().setname, "std");
        assert_eq!(ctx.deferred(), 2);

        let order: Vec<_> = ctx
            .take_deferred()
            .into_iter()
            .map(|d| d.setname)
            .collect();
        assert_eq!(order, vec!["bl", "hb"]);
        assert_eq!(ctx.deferred(), 0);
    }

    #[test]
    fn test_begin_pass_clears_buckets() {
        let mut ctx = RunContext::new(PathMapping::new("", ""), 20);
        ctx.defer(descriptor("bl", DescriptorKind::Bootleg));
        ctx.begin_pass();
        assert_eq!(ctx.deferred(), 0);
    }

    #[test]
    fn test_summary() {
        let stats = BuildStats {
            games_found: 3,
            descriptors_processed: 2,
            games_updated: 1,
            duplicates_skipped: 1,
            errors: 0,
        };
        assert_eq!(
            stats.summary(),
            "3 games found, 2 descriptor files processed, 1 games updated, \
             1 duplicates skipped, 0 errors"
        );
    }
}
