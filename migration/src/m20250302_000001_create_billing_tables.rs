use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 订阅套餐表 ====================
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubscriptionPlans::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubscriptionPlans::Name).string().not_null())
                    .col(ColumnDef::new(SubscriptionPlans::Description).text().null())
                    .col(ColumnDef::new(SubscriptionPlans::Price).double().not_null())
                    .col(
                        ColumnDef::new(SubscriptionPlans::BillingInterval)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SubscriptionPlans::Features).json().null())
                    .col(ColumnDef::new(SubscriptionPlans::MaxStudents).integer().null())
                    .col(ColumnDef::new(SubscriptionPlans::MaxTeachers).integer().null())
                    .col(ColumnDef::new(SubscriptionPlans::MaxCourses).integer().null())
                    .col(
                        ColumnDef::new(SubscriptionPlans::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionPlans::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 订阅表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscriptions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subscriptions::AdminId).big_integer().not_null())
                    .col(ColumnDef::new(Subscriptions::PlanId).big_integer().not_null())
                    .col(ColumnDef::new(Subscriptions::Status).string().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::StartDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Subscriptions::EndDate).date().null())
                    .col(
                        ColumnDef::new(Subscriptions::AutoRenew)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::StripeSubscriptionId)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Subscriptions::Table, Subscriptions::AdminId)
                            .to(Admins::Table, Admins::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Subscriptions::Table, Subscriptions::PlanId)
                            .to(SubscriptionPlans::Table, SubscriptionPlans::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 订阅账单表 ====================
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionInvoices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubscriptionInvoices::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionInvoices::SubscriptionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SubscriptionInvoices::Amount).double().not_null())
                    .col(ColumnDef::new(SubscriptionInvoices::Status).string().not_null())
                    .col(
                        ColumnDef::new(SubscriptionInvoices::BillingDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionInvoices::PaidDate)
                            .date()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionInvoices::PaymentMethod)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionInvoices::InvoiceNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionInvoices::StripeInvoiceId)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SubscriptionInvoices::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                SubscriptionInvoices::Table,
                                SubscriptionInvoices::SubscriptionId,
                            )
                            .to(Subscriptions::Table, Subscriptions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 用量记录表 ====================
        manager
            .create_table(
                Table::create()
                    .table(UsageMetrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UsageMetrics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UsageMetrics::AdminId).big_integer().not_null())
                    .col(ColumnDef::new(UsageMetrics::MetricName).string().not_null())
                    .col(
                        ColumnDef::new(UsageMetrics::MetricValue)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UsageMetrics::RecordedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UsageMetrics::Table, UsageMetrics::AdminId)
                            .to(Admins::Table, Admins::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 索引 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subscriptions_admin_status")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::AdminId)
                    .col(Subscriptions::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_usage_metrics_admin_recorded")
                    .table(UsageMetrics::Table)
                    .col(UsageMetrics::AdminId)
                    .col(UsageMetrics::RecordedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UsageMetrics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubscriptionInvoices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubscriptionPlans::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Admins {
    #[sea_orm(iden = "admins")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum SubscriptionPlans {
    #[sea_orm(iden = "subscription_plans")]
    Table,
    Id,
    Name,
    Description,
    Price,
    BillingInterval,
    Features,
    MaxStudents,
    MaxTeachers,
    MaxCourses,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subscriptions {
    #[sea_orm(iden = "subscriptions")]
    Table,
    Id,
    AdminId,
    PlanId,
    Status,
    StartDate,
    EndDate,
    AutoRenew,
    StripeSubscriptionId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SubscriptionInvoices {
    #[sea_orm(iden = "subscription_invoices")]
    Table,
    Id,
    SubscriptionId,
    Amount,
    Status,
    BillingDate,
    PaidDate,
    PaymentMethod,
    InvoiceNumber,
    StripeInvoiceId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UsageMetrics {
    #[sea_orm(iden = "usage_metrics")]
    Table,
    Id,
    AdminId,
    MetricName,
    MetricValue,
    RecordedAt,
}
