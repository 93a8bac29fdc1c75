use crate::ledger::{Category, CategoryIcon, Ledger, RecordId};

use super::{ServiceError, ServiceResult};

const SUGGESTION_THRESHOLD: f64 = 0.8;

pub struct CategoryService;

impl CategoryService {
    /// Appends a category. Names are trimmed, must be non-empty and must not
    /// collide (ignoring ASCII case) with an existing category.
    pub fn add(
        ledger: &mut Ledger,
        name: &str,
        icon: CategoryIcon,
        color: &str,
    ) -> ServiceResult<RecordId> {
        let name = name.trim();
        Self::validate_name(ledger, name, None)?;
        Ok(ledger.add_category(Category::new(name, icon, color)))
    }

    /// Applies `mutator` to a copy of the category and stores it if the name
    /// is still valid. A rename is carried over to every transaction filed
    /// under the old name.
    pub fn update<F>(ledger: &mut Ledger, id: &RecordId, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Category),
    {
        let current = ledger
            .category(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("Category {id}")))?;
        let mut updated = current.clone();
        mutator(&mut updated);
        updated.id = current.id.clone();
        updated.name = updated.name.trim().to_string();
        Self::validate_name(ledger, &updated.name, Some(id))?;

        if updated.name != current.name {
            for txn in ledger
                .transactions
                .iter_mut()
                .filter(|txn| current.matches_name(&txn.category))
            {
                txn.category = updated.name.clone();
            }
        }
        if let Some(slot) = ledger.category_mut(id) {
            *slot = updated;
        }
        Ok(())
    }

    /// Removes a category that no transaction refers to.
    pub fn remove(ledger: &mut Ledger, id: &RecordId) -> ServiceResult<Category> {
        let category = ledger
            .category(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Category {id}")))?;
        let in_use = ledger
            .transactions
            .iter()
            .filter(|txn| category.matches_name(&txn.category))
            .count();
        if in_use > 0 {
            return Err(ServiceError::Invalid(format!(
                "Category `{}` is used by {in_use} transaction(s)",
                category.name
            )));
        }
        ledger
            .remove_category(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Category {id}")))
    }

    /// Canonical category name for `candidate`, or an error that names the
    /// closest match when there is one.
    pub fn resolve_name<'a>(ledger: &'a Ledger, candidate: &str) -> ServiceResult<&'a str> {
        if let Some(category) = ledger.category_by_name(candidate) {
            return Ok(&category.name);
        }
        let message = match Self::suggest(ledger, candidate) {
            Some(close) => format!(
                "Category `{}` not found; did you mean `{}`?",
                candidate.trim(),
                close
            ),
            None => format!("Category `{}` not found", candidate.trim()),
        };
        Err(ServiceError::Invalid(message))
    }

    /// Closest existing category name by Jaro-Winkler similarity.
    pub fn suggest<'a>(ledger: &'a Ledger, candidate: &str) -> Option<&'a str> {
        let needle = candidate.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        ledger
            .categories
            .iter()
            .map(|category| {
                let score = strsim::jaro_winkler(&needle, &category.name.to_lowercase());
                (score, category.name.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, name)| name)
    }

    fn validate_name(
        ledger: &Ledger,
        candidate: &str,
        except: Option<&RecordId>,
    ) -> ServiceResult<()> {
        if candidate.is_empty() {
            return Err(ServiceError::Invalid("Category name cannot be empty".into()));
        }
        let taken = ledger
            .categories
            .iter()
            .any(|category| Some(&category.id) != except && category.matches_name(candidate));
        if taken {
            return Err(ServiceError::Invalid(format!(
                "Category `{}` already exists",
                candidate
            )));
        }
        Ok(())
    }
}
