use crate::denylist::Denylist;
use crate::plan::Plan;
use crate::report::{Report, Violation};
use crate::stage::Stage;
use crate::types::ViolationKind;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

pub struct Validator {
    denylist: Denylist,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Denylist::default())
    }
}

impl Validator {
    pub fn new(denylist: Denylist) -> Self {
        Self { denylist }
    }

    /// Check `plan` against the structural rules and report every breach.
    ///
    /// Pure and deterministic: identical input yields an identical report.
    /// Violations are ordered by stage declaration order, then by pass
    /// (uniqueness, references, cycles, criteria) within a stage.
    pub fn validate(&self, plan: &Plan) -> Report {
        let stages = &plan.stages;
        let n = stages.len();

        // Position of the first stage declaring each id. Dependency edges
        // bind here; later duplicates are flagged by the uniqueness pass.
        let mut first_by_id: HashMap<u32, usize> = HashMap::new();
        for (i, s) in stages.iter().enumerate() {
            first_by_id.entry(s.id).or_insert(i);
        }

        // One bucket per stage per pass, assembled in order at the end.
        let mut uniqueness: Vec<Vec<Violation>> = vec![Vec::new(); n];
        let mut references: Vec<Vec<Violation>> = vec![Vec::new(); n];
        let mut cycles: Vec<Vec<Violation>> = vec![Vec::new(); n];
        let mut criteria: Vec<Vec<Violation>> = vec![Vec::new(); n];

        self.check_uniqueness(stages, &first_by_id, &mut uniqueness);
        let edges = self.check_references(stages, &first_by_id, &mut references);
        self.check_cycles(stages, &edges, &mut cycles);
        self.check_criteria(stages, &mut criteria);

        let mut violations = Vec::new();
        for i in 0..n {
            violations.append(&mut uniqueness[i]);
            violations.append(&mut references[i]);
            violations.append(&mut cycles[i]);
            violations.append(&mut criteria[i]);
        }
        Report::from_violations(violations)
    }

    // -----------------------------------------------------------------------
    // Pass 1: id and name uniqueness
    // -----------------------------------------------------------------------

    fn check_uniqueness(
        &self,
        stages: &[Stage],
        first_by_id: &HashMap<u32, usize>,
        out: &mut [Vec<Violation>],
    ) {
        let mut first_by_name: HashMap<&str, usize> = HashMap::new();
        for (i, s) in stages.iter().enumerate() {
            if first_by_id[&s.id] != i {
                out[i].push(Violation {
                    kind: ViolationKind::DuplicateId,
                    stage_id: s.id,
                    related_id: None,
                    detail: format!(
                        "stage id {} is already declared by '{}'",
                        s.id,
                        stages[first_by_id[&s.id]].name.trim()
                    ),
                });
            }
            let name = s.name.trim();
            match first_by_name.get(name) {
                Some(&j) => out[i].push(Violation {
                    kind: ViolationKind::DuplicateName,
                    stage_id: s.id,
                    related_id: Some(stages[j].id),
                    detail: format!(
                        "stage name '{}' is already used by stage {}",
                        name, stages[j].id
                    ),
                }),
                None => {
                    first_by_name.insert(name, i);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Pass 2: dependency references
    // -----------------------------------------------------------------------

    /// Flags missing and forward/self references, and returns the position
    /// graph of resolvable edges for the cycle pass. Self-edges are left out
    /// of the graph: they are already reported here.
    fn check_references(
        &self,
        stages: &[Stage],
        first_by_id: &HashMap<u32, usize>,
        out: &mut [Vec<Violation>],
    ) -> Vec<Vec<usize>> {
        let mut edges: Vec<Vec<usize>> = vec![Vec::new(); stages.len()];
        for (i, s) in stages.iter().enumerate() {
            for &dep in &s.depends_on {
                match first_by_id.get(&dep) {
                    None => out[i].push(Violation {
                        kind: ViolationKind::UnknownDependency,
                        stage_id: s.id,
                        related_id: None,
                        detail: format!("depends on stage {dep}, which does not exist in the plan"),
                    }),
                    Some(&j) => {
                        if dep >= s.id {
                            let detail = if dep == s.id {
                                format!("stage {} depends on itself", s.id)
                            } else {
                                format!("depends on stage {dep}, which is not an earlier stage")
                            };
                            out[i].push(Violation {
                                kind: ViolationKind::ForwardOrSelfDependency,
                                stage_id: s.id,
                                related_id: Some(dep),
                                detail,
                            });
                        }
                        if j != i {
                            edges[i].push(j);
                        }
                    }
                }
            }
        }
        edges
    }

    // -----------------------------------------------------------------------
    // Pass 3: cycle detection
    // -----------------------------------------------------------------------

    /// DFS over stage positions with an in-progress marker. Independent of
    /// the ordering rule in pass 2, so plans whose ids are not sequential
    /// still get cycle coverage.
    fn check_cycles(&self, stages: &[Stage], edges: &[Vec<usize>], out: &mut [Vec<Violation>]) {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Finished,
        }

        fn visit(
            i: usize,
            stages: &[Stage],
            edges: &[Vec<usize>],
            marks: &mut [Mark],
            out: &mut [Vec<Violation>],
        ) {
            marks[i] = Mark::InProgress;
            for &j in &edges[i] {
                match marks[j] {
                    Mark::InProgress => out[i].push(Violation {
                        kind: ViolationKind::CyclicDependency,
                        stage_id: stages[i].id,
                        related_id: Some(stages[j].id),
                        detail: format!(
                            "stage {} and stage {} form a dependency cycle",
                            stages[i].id, stages[j].id
                        ),
                    }),
                    Mark::Unvisited => visit(j, stages, edges, marks, out),
                    Mark::Finished => {}
                }
            }
            marks[i] = Mark::Finished;
        }

        let mut marks = vec![Mark::Unvisited; stages.len()];
        for i in 0..stages.len() {
            if marks[i] == Mark::Unvisited {
                visit(i, stages, edges, &mut marks, out);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Pass 4: completion criteria
    // -----------------------------------------------------------------------

    fn check_criteria(&self, stages: &[Stage], out: &mut [Vec<Violation>]) {
        for (i, s) in stages.iter().enumerate() {
            if s.criteria.is_empty() {
                out[i].push(Violation {
                    kind: ViolationKind::MissingCriteria,
                    stage_id: s.id,
                    related_id: None,
                    detail: format!("stage '{}' declares no completion criteria", s.name.trim()),
                });
                continue;
            }
            for c in &s.criteria {
                if c.trim().is_empty() {
                    out[i].push(Violation {
                        kind: ViolationKind::VagueCriteria,
                        stage_id: s.id,
                        related_id: None,
                        detail: "criterion text is empty".to_string(),
                    });
                } else if let Some(term) = self.denylist.matches(c) {
                    out[i].push(Violation {
                        kind: ViolationKind::VagueCriteria,
                        stage_id: s.id,
                        related_id: None,
                        detail: format!(
                            "criterion '{}' matches denylisted term '{}'",
                            c.trim(),
                            term
                        ),
                    });
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
