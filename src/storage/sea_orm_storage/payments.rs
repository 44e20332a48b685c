use super::{SeaOrmStorage, page_params};
use crate::entity::payments::{ActiveModel, Column, Entity as Payments};
use crate::errors::{EduManageError, Result};
use crate::models::payments::{
    entities::{Payment, PaymentListResponse, is_paid_status},
    requests::{PaymentListQuery, UpdatePaymentRequest},
};
use crate::storage::{NewPayment, PaymentTotals};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_payment_impl(&self, payment: NewPayment) -> Result<Payment> {
        let model = ActiveModel {
            student_id: Set(payment.student_id),
            amount: Set(payment.amount),
            date: Set(payment.date),
            method: Set(payment.method),
            status: Set(payment.status),
            receipt_path: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建缴费记录失败: {e}")))?;

        Ok(result.into_payment())
    }

    pub async fn get_payment_by_id_impl(&self, id: i64) -> Result<Option<Payment>> {
        let result = Payments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询缴费记录失败: {e}")))?;

        Ok(result.map(|m| m.into_payment()))
    }

    pub async fn list_payments_with_pagination_impl(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaymentListResponse> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Payments::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        select = select.order_by_desc(Column::Id);

        self.paginate(select, page, size, "缴费记录", |m| m.into_payment())
            .await
    }

    pub async fn update_payment_impl(
        &self,
        id: i64,
        update: UpdatePaymentRequest,
    ) -> Result<Option<Payment>> {
        if self.get_payment_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(amount) = update.amount {
            model.amount = Set(amount);
        }
        if let Some(date) = update.date {
            model.date = Set(date);
        }
        if let Some(method) = update.method {
            model.method = Set(Some(method));
        }
        if let Some(status) = update.status {
            model.status = Set(status);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新缴费记录失败: {e}")))?;

        Ok(Some(result.into_payment()))
    }

    pub async fn set_payment_receipt_impl(&self, id: i64, receipt_path: &str) -> Result<bool> {
        let result = Payments::update_many()
            .col_expr(
                Column::ReceiptPath,
                sea_orm::sea_query::Expr::value(receipt_path),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("保存收据路径失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_payment_impl(&self, id: i64) -> Result<bool> {
        let result = Payments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("删除缴费记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 区间内已缴与未缴金额
    pub async fn payment_totals_impl(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<PaymentTotals> {
        let mut select = Payments::find()
            .select_only()
            .column(Column::Amount)
            .column(Column::Status);
        if let Some(from) = from {
            select = select.filter(Column::Date.gte(from));
        }
        if let Some(to) = to {
            select = select.filter(Column::Date.lte(to));
        }

        let rows: Vec<(f64, String)> = select
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("统计缴费金额失败: {e}")))?;

        Ok(rows
            .into_iter()
            .fold(PaymentTotals::default(), |mut acc, (amount, status)| {
                if is_paid_status(&status) {
                    acc.paid += amount;
                } else {
                    acc.unpaid += amount;
                }
                acc
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::storage::NewPayment;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_payment_totals_split_by_status() {
        let storage = memory_storage().await;
        let s = storage
            .create_student_impl(CreateStudentRequest {
                full_name: "Rania El Amrani".into(),
                group_id: None,
                email: None,
                phone: None,
                address: None,
                birth_date: None,
                gender: None,
                status: None,
            })
            .await
            .unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 9, 15).unwrap();

        for (amount, status) in [(600.0, "paid"), (400.0, "PAID"), (250.0, "unpaid")] {
            storage
                .create_payment_impl(NewPayment {
                    student_id: s.id,
                    amount,
                    date: day,
                    method: Some("cash".into()),
                    status: status.into(),
                })
                .await
                .unwrap();
        }

        let totals = storage.payment_totals_impl(None, None).await.unwrap();
        assert_eq!(totals.paid, 1000.0);
        assert_eq!(totals.unpaid, 250.0);

        let none = storage
            .payment_totals_impl(None, NaiveDate::from_ymd_opt(2024, 9, 1))
            .await
            .unwrap();
        assert_eq!(none.paid, 0.0);
    }

    #[tokio::test]
    async fn test_receipt_path_is_stored() {
        let storage = memory_storage().await;
        let s = storage
            .create_student_impl(CreateStudentRequest {
                full_name: "Adam Lahlou".into(),
                group_id: None,
                email: None,
                phone: None,
                address: None,
                birth_date: None,
                gender: None,
                status: None,
            })
            .await
            .unwrap();
        let p = storage
            .create_payment_impl(NewPayment {
                student_id: s.id,
                amount: 300.0,
                date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
                method: None,
                status: "paid".into(),
            })
            .await
            .unwrap();
        assert!(p.receipt_path.is_none());

        assert!(
            storage
                .set_payment_receipt_impl(p.id, "receipts/receipt_1.pdf")
                .await
                .unwrap()
        );
        let reloaded = storage.get_payment_by_id_impl(p.id).await.unwrap().unwrap();
        assert_eq!(reloaded.receipt_path.as_deref(), Some("receipts/receipt_1.pdf"));
    }
}
