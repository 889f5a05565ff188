//! Bundled record-keeping taxonomy
//!
//! Used when no remote endpoint is configured, and by tests.

use super::types::{Category, RecordType, Subcategory, Taxonomy};

type RecordRow = (&'static str, &'static str);
type SubcategoryRow = (&'static str, &'static str, &'static [RecordRow]);
type CategoryRow = (&'static str, &'static str, &'static [SubcategoryRow]);

const FIXTURE: &[CategoryRow] = &[
    (
        "accounts-legal",
        "Accounts and legal records",
        &[
            (
                "bookkeeping",
                "Bookkeeping, financial and accounting records",
                &[
                    ("annual-reports", "Annual reports and financial statements"),
                    ("bank-statements", "Bank statements and reconciliations"),
                    ("invoice-records", "Invoice and billing records"),
                    ("tax-filings", "Tax filings and supporting documents"),
                ],
            ),
            (
                "corporate-business",
                "Corporate and business records",
                &[
                    ("articles-incorporation", "Articles of incorporation"),
                    ("board-resolutions", "Board resolutions and minutes"),
                    ("shareholder-agreements", "Shareholder agreements"),
                ],
            ),
            (
                "contracts",
                "Contracts, contract performance, remedies, and notarial deeds",
                &[
                    ("service-agreements", "Service agreements"),
                    ("vendor-contracts", "Vendor contracts"),
                    ("lease-agreements", "Lease agreements"),
                ],
            ),
            (
                "contracts-related",
                "Contracts related to commercial transactions",
                &[
                    ("purchase-orders", "Purchase orders"),
                    ("sales-contracts", "Sales contracts"),
                ],
            ),
        ],
    ),
    (
        "tax-records",
        "Tax records",
        &[
            (
                "income-tax",
                "Income tax records",
                &[
                    ("tax-returns", "Annual tax returns"),
                    ("tax-assessments", "Tax assessments"),
                ],
            ),
            (
                "payroll-tax",
                "Payroll tax records",
                &[
                    ("payroll-registers", "Payroll registers"),
                    ("tax-withholdings", "Tax withholding records"),
                ],
            ),
        ],
    ),
    (
        "hr-records",
        "Human Resources (HR) records",
        &[
            (
                "employee-files",
                "Employee personnel files",
                &[
                    ("employment-contracts", "Employment contracts"),
                    ("performance-reviews", "Performance reviews"),
                ],
            ),
            (
                "payroll-hr",
                "Payroll and compensation records",
                &[
                    ("salary-records", "Salary and wage records"),
                    ("benefits-records", "Benefits enrollment records"),
                ],
            ),
        ],
    ),
    (
        "health-safety",
        "Health and safety records",
        &[
            (
                "incident-reports",
                "Incident and accident reports",
                &[
                    ("workplace-incidents", "Workplace incident reports"),
                    ("safety-inspections", "Safety inspection records"),
                ],
            ),
            (
                "training-records",
                "Safety training records",
                &[
                    ("safety-certifications", "Safety certifications"),
                    ("training-materials", "Training materials and documentation"),
                ],
            ),
        ],
    ),
    (
        "environmental",
        "Environmental records",
        &[(
            "compliance-reports",
            "Environmental compliance reports",
            &[
                ("emissions-reports", "Emissions monitoring reports"),
                ("waste-management", "Waste management records"),
            ],
        )],
    ),
    (
        "transport-logistics",
        "Transport and logistics records",
        &[
            (
                "shipping-records",
                "Shipping and delivery records",
                &[
                    ("delivery-receipts", "Delivery receipts"),
                    ("transport-logs", "Transportation logs"),
                ],
            ),
            (
                "vehicle-records",
                "Vehicle maintenance records",
                &[
                    ("maintenance-logs", "Vehicle maintenance logs"),
                    ("fuel-records", "Fuel and mileage records"),
                ],
            ),
        ],
    ),
    (
        "personal-data",
        "Personal data and data privacy",
        &[
            (
                "privacy-policies",
                "Privacy policies and procedures",
                &[
                    ("data-processing", "Data processing agreements"),
                    ("consent-records", "Consent and authorization records"),
                ],
            ),
            (
                "data-breach",
                "Data breach and incident records",
                &[
                    ("breach-reports", "Data breach incident reports"),
                    ("remediation-plans", "Breach remediation plans"),
                ],
            ),
        ],
    ),
];

/// Build the bundled taxonomy
#[must_use]
pub fn taxonomy() -> Taxonomy {
    Taxonomy::new(
        FIXTURE
            .iter()
            .map(|(id, name, subs)| {
                Category::new(
                    *id,
                    *name,
                    subs.iter()
                        .map(|(id, name, records)| {
                            Subcategory::new(
                                *id,
                                *name,
                                records
                                    .iter()
                                    .map(|(id, name)| RecordType::new(*id, *name))
                                    .collect(),
                            )
                        })
                        .collect(),
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        let tax = taxonomy();
        assert_eq!(tax.categories().len(), 7);
        assert_eq!(tax.categories()[0].name, "Accounts and legal records");
        assert_eq!(tax.categories()[0].subcategories.len(), 4);
        assert_eq!(tax.node_count(), 7 + 15 + 34);
    }
}
