//! Budget requests handed off to WhatsApp
//!
//! The site does not store quote requests. The visitor picks services and
//! writes a short note, and we build a `wa.me` deep link with the message
//! already filled in.

use thiserror::Error;

use crate::catalog::Category;

const WHATSAPP_BASE_URL: &str = "https://wa.me";

#[derive(Error, Debug, PartialEq)]
pub enum BudgetError {
    #[error("Por favor, selecione pelo menos um serviço")]
    NoServices,

    #[error("Serviço desconhecido: {0}")]
    UnknownService(String),
}

/// A quote request composed on the budget page
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRequest {
    pub name: String,
    pub services: Vec<Category>,
    pub details: String,
}

impl BudgetRequest {
    /// Build a request from raw form values, services given as slugs or labels.
    pub fn from_form(name: &str, services: &[String], details: &str) -> Result<Self, BudgetError> {
        let mut selected = Vec::with_capacity(services.len());
        for raw in services {
            let category = Category::parse(raw.trim())
                .ok_or_else(|| BudgetError::UnknownService(raw.clone()))?;
            selected.push(category);
        }

        if selected.is_empty() {
            return Err(BudgetError::NoServices);
        }

        Ok(Self {
            name: name.trim().to_string(),
            services: selected,
            details: details.trim().to_string(),
        })
    }

    /// Selected services in catalog order, without duplicates
    pub fn ordered_services(&self) -> Vec<Category> {
        Category::all()
            .iter()
            .copied()
            .filter(|c| self.services.contains(c))
            .collect()
    }

    pub fn compose_message(&self) -> String {
        let services = self
            .ordered_services()
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ");

        let mut message = format!(
            "Olá! Meu nome é {}.\n\nGostaria de solicitar orçamento para os seguintes serviços:\n\n{}",
            self.name, services
        );

        if !self.details.is_empty() {
            message.push_str("\n\nDetalhes: ");
            message.push_str(&self.details);
        }

        message
    }

    pub fn whatsapp_url(&self, number: &str) -> Result<String, BudgetError> {
        if self.services.is_empty() {
            return Err(BudgetError::NoServices);
        }

        Ok(format!(
            "{}/{}?text={}",
            WHATSAPP_BASE_URL,
            number,
            urlencoding::encode(&self.compose_message())
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(services: Vec<Category>, details: &str) -> BudgetRequest {
        BudgetRequest {
            name: "Maria".to_string(),
            services,
            details: details.to_string(),
        }
    }

    #[test]
    fn test_message_lists_services_in_catalog_order() {
        let req = request(vec![Category::Pintura, Category::Eletrica, Category::Pintura], "");
        assert_eq!(
            req.compose_message(),
            "Olá! Meu nome é Maria.\n\nGostaria de solicitar orçamento para os seguintes serviços:\n\nElétrica, Pintura"
        );
    }

    #[test]
    fn test_message_appends_details() {
        let req = request(vec![Category::Hidraulica], "Vazamento na cozinha");
        assert!(req
            .compose_message()
            .ends_with("Hidráulica\n\nDetalhes: Vazamento na cozinha"));
    }

    #[test]
    fn test_whatsapp_url_is_percent_encoded() {
        let req = request(vec![Category::Eletrica], "");
        let url = req.whatsapp_url("5519971387382").unwrap();

        assert!(url.starts_with("https://wa.me/5519971387382?text="));
        assert!(!url.contains(' '));
        assert!(!url.contains('\n'));
        assert!(url.contains("%0A%0A"));
        assert!(url.contains("El%C3%A9trica"));
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        assert_eq!(
            BudgetRequest::from_form("Ana", &[], "").unwrap_err(),
            BudgetError::NoServices
        );
        assert_eq!(
            request(vec![], "").whatsapp_url("55").unwrap_err(),
            BudgetError::NoServices
        );
    }

    #[test]
    fn test_from_form_accepts_slugs_and_labels() {
        let req = BudgetRequest::from_form(
            " João ",
            &["montagem".to_string(), "Elétrica".to_string()],
            "  ",
        )
        .unwrap();

        assert_eq!(req.name, "João");
        assert_eq!(req.ordered_services(), vec![Category::Eletrica, Category::Montagem]);
        assert!(req.details.is_empty());

        assert!(matches!(
            BudgetRequest::from_form("x", &["telhado".to_string()], ""),
            Err(BudgetError::UnknownService(_))
        ));
    }
}
